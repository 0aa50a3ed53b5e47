pub mod common;

pub mod a001_company;
pub mod a002_branch;
pub mod a003_category;
pub mod a004_supply;
pub mod a005_product;
pub mod a006_promotion;
