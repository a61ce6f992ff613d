//! User-facing copy shared by every frontend.

pub const APP_NAME: &str = "Dream Mate";

pub const INTRO_TITLE: &str = "✨ Dream Mate";
pub const INTRO_TAGLINE: &str = "A Conversation to Discover Your Dream";
pub const INTRO_BLURB: &str = "A quiet space to meet yourself, one heartful prompt at a time.";
pub const INTRO_ACTION: &str = "Begin My Journey";
pub const INTRO_FOOTNOTE: &str = "Take your time. This is your space.";

pub const TYPING: &str = "Dream Mate is typing";
pub const PLACEHOLDER: &str = "Write freely, like it's your own journal...";
pub const BACK: &str = "← Back";
pub const RESTART: &str = "Start Again";
