mod capture;
mod handle;
mod resize;
mod session;
mod terminal;

pub use capture::CAPTURE_BUDGET;
pub use session::PtySession;
