mod common;
mod drag;
mod routing;
