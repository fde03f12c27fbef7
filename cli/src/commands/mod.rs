pub mod check;
pub mod find;
pub mod list;

pub use check::check_mount_point;
pub use find::find_mount_point;
pub use list::list_mount_points;
