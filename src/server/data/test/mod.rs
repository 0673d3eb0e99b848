mod booking;
mod car;
mod country;
mod location;
mod notification;
mod token;
mod user;
