pub mod carousel;
pub mod entities;
pub mod normalize;
pub mod read_time;
pub mod use_cases;
