pub use super::additional_driver::Entity as AdditionalDriver;
pub use super::booking::Entity as Booking;
pub use super::car::Entity as Car;
pub use super::car_location::Entity as CarLocation;
pub use super::country::Entity as Country;
pub use super::date_based_price::Entity as DateBasedPrice;
pub use super::location::Entity as Location;
pub use super::notification::Entity as Notification;
pub use super::notification_counter::Entity as NotificationCounter;
pub use super::parking_spot::Entity as ParkingSpot;
pub use super::push_token::Entity as PushToken;
pub use super::token::Entity as Token;
pub use super::user::Entity as User;
