pub mod audio;
pub mod event;
pub mod ui;
pub mod util;
