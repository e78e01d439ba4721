mod sample;
mod stop;

pub mod prelude {
    pub use crate::sample::{Sample, SampleError};
    pub use crate::stop::{StopHandle, StopListener};
}
