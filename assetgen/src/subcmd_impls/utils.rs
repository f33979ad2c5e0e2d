use image::Rgb;
use tracing_subscriber::EnvFilter;

/// 解析`RRGGBB`或`#RRGGBB`格式的十六进制颜色。
pub fn color_valid_rgb_hex(s: &str) -> Result<Rgb<u8>, &'static str> {
    const ERR: &str = "十六进制RGB颜色格式错误";
    fn ck(s: &str) -> Option<Rgb<u8>> {
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&s[0..=1], 16).ok()?;
        let g = u8::from_str_radix(&s[2..=3], 16).ok()?;
        let b = u8::from_str_radix(&s[4..=5], 16).ok()?;
        Some(Rgb::from([r, g, b]))
    }
    match s.len() {
        6 => ck(s).ok_or(ERR),
        7 if s.as_bytes()[0] == b'#' => ck(&s[1..]).ok_or(ERR),
        _ => Err(ERR),
    }
}

/// 安装日志输出。级别取自`RUST_LOG`，默认为`info`。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
