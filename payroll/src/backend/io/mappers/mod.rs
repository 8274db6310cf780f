pub mod appointment_mapper;

pub use appointment_mapper::AppointmentMapper;
