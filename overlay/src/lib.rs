//! 将一对三维医学体数据（强度体与配准的标签体）转换为供网页使用的二维PNG素材：
//! 一张灰度底图，以及三张不同形态的半透明彩色掩膜叠加图。

pub mod error;
pub mod pipeline;
pub mod prelude;
pub mod prep;

pub use error::{Error, Result};
pub use pipeline::{generate, AssetConfig, AssetReport};
