pub mod donation;
pub mod user;

pub use donation::{Donation, NewDonation};
pub use user::{Coords, NewUser, PublicUser, User, UserPatch};
