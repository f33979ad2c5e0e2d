pub mod args;
mod generate;
mod inspect;
mod utils;
