pub mod bar;
pub mod historical;
pub mod reference;
pub mod tick;

pub mod util;
