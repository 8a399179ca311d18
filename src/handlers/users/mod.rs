pub mod current;
pub mod login;
pub mod register;
pub mod update;

pub use current::get as current_user;
pub use login::post as login;
pub use register::post as register;
pub use update::put as update_user;
