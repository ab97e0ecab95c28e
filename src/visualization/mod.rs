pub mod driver;
pub mod rbsim_vis2d;
