pub mod memory;
pub mod repository;
pub mod seaorm;
pub mod service;

pub use repository::{CityCount, CustomerFilter, CustomerRepository, NewCustomer};
pub use seaorm::SeaOrmCustomerRepository;
pub use service::CustomerService;
