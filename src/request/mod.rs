pub mod params;
pub mod pool;

pub use params::{ParamSink, Params};
pub use pool::ParamsPool;
