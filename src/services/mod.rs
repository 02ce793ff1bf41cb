pub mod normalize;
pub mod refresh;
pub mod resolver;
pub mod translator;
