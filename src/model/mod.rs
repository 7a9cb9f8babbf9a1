pub mod gig;

pub use gig::{Address, Gig, Location, Venue};
