/// Speaker is used by the interpreter to make its tone. It should abstract the
/// implementation details, so a variety of audio devices (or none) would work.
pub trait Speaker {
    /// play the tone for this step
    fn beep(&mut self);

    /// stop playing the tone; called once when the sound timer runs out
    fn silence(&mut self) {}
}

/// A speaker that makes no sound
#[derive(Debug, Default, Clone, Copy)]
pub struct Mute;

impl Speaker for Mute {
    fn beep(&mut self) {}
}
