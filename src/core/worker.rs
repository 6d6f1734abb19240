/// Entry point invoked by the surrounding execution environment.
///
/// `run` takes no input and reports nothing back: implementations catch
/// their own failures and report them out-of-band.
pub trait Runnable: Send + Sync {
    fn run(&self);

    /// Name used in log records about this runnable.
    fn name(&self) -> &str;
}
