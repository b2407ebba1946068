pub mod customer;
pub mod feasibility;
pub mod quote;
pub mod site;
