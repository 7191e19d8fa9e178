mod common;
mod justification;
mod routing;
