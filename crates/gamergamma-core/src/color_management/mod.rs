//! Transfer functions selectable in place of the plain power-law gamma.

pub mod transfer;
