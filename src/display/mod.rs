// Display module - frame output types
//
// The backend produces packed-RGB frames; a front-end decides how to scale
// and present them. Only the framebuffer type lives here.

mod framebuffer;

pub use framebuffer::{FrameBuffer, SCREEN_HEIGHT, SCREEN_SIZE, SCREEN_WIDTH};
