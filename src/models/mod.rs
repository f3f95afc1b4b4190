mod address;
mod api;
mod area;
mod client;
mod location;

pub use address::Address;
pub use api::{
    ApiAddress, ApiClient, ApiLocation, ClientPayload, PayloadAddress, PayloadLocation,
};
pub use area::Area;
pub use client::{Client, ClientFormData, ClientStatus};
pub use location::{ClientLocation, ClientLocationFormData};
