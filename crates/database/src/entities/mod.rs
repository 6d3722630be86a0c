pub mod location;
pub mod setting;
pub mod signup;
pub mod workout;

pub use location as locations;
pub use setting as settings;
pub use signup as signups;
pub use workout as workouts;
