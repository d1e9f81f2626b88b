/// Fatal configuration errors detected before any frame is processed.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("square source must detect exactly 4-sided polygons (reports {min}..{max})")]
    WrongSideCount { min: u32, max: u32 },
    #[error("square source must emit counter-clockwise polygons")]
    WrongWinding,
}
