//! Landing page.

