use core::fmt;

/// Peripheral failure seen by the frame loop. Collisions are game state, not
/// errors; anything here means the board is not working.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// OLED draw or flush failed.
    Display(E),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Display(e) => write!(f, "display error: {e:?}"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}
