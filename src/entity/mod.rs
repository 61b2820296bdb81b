pub mod admins;
pub mod audit_logs;
pub mod colors;
pub mod customers;
pub mod order_items;
pub mod orders;
pub mod product_accessories;
pub mod products;
pub mod reviews;
pub mod users;

pub use admins::Entity as Admins;
pub use audit_logs::Entity as AuditLogs;
pub use colors::Entity as Colors;
pub use customers::Entity as Customers;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use product_accessories::Entity as ProductAccessories;
pub use products::Entity as Products;
pub use reviews::Entity as Reviews;
pub use users::Entity as Users;
