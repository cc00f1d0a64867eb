//! BlueZ media player access: bus gateway, player discovery and state reads.

mod error;
mod gateway;
mod locator;
mod reader;
mod value;

pub use error::{BusError, ReadError};
pub use gateway::{BusGateway, ZbusGateway};
pub use locator::{PlayerHandle, PlayerLocator};
pub use reader::StateReader;
pub use value::PropertyValue;
