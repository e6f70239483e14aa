/*!
 * Concurrent Trial Execution
 * Worker fan-out and barrier-synchronized timing for one trial
 */

mod mix;
mod trial;

pub use mix::OperationMix;
pub use trial::{run_trial, TrialStreams};
