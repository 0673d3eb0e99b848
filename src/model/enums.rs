use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Declares a fieldless enum stored as a lower snake_case string.
///
/// Generates `as_str`, `FromStr`, `Display` and an `ALL` listing next to the serde
/// derives, so the wire format and the stored column always agree.
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($value => Ok($name::$variant),)+
                    other => Err(format!("unknown {} '{}'", stringify!($name), other)),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum!(
    /// Account kind. Suppliers own cars; users are customers.
    UserType {
        Admin => "admin",
        Supplier => "supplier",
        User => "user",
    }
);

string_enum!(
    /// Booking lifecycle: void → pending → deposit/paid → reserved/cancelled.
    BookingStatus {
        Void => "void",
        Pending => "pending",
        Deposit => "deposit",
        Paid => "paid",
        Reserved => "reserved",
        Cancelled => "cancelled",
    }
);

impl BookingStatus {
    /// Statuses that hold the car for the booked dates.
    pub const ACTIVE: &'static [BookingStatus] = &[
        BookingStatus::Pending,
        BookingStatus::Deposit,
        BookingStatus::Paid,
        BookingStatus::Reserved,
    ];
}

string_enum!(
    /// Engine / fuel type of a car.
    CarType {
        Diesel => "diesel",
        Gasoline => "gasoline",
        Electric => "electric",
        Hybrid => "hybrid",
        PluginHybrid => "plugin_hybrid",
        Unknown => "unknown",
    }
);

string_enum!(
    Gearbox {
        Manual => "manual",
        Automatic => "automatic",
    }
);

string_enum!(
    FuelPolicy {
        LikeForLike => "like_for_like",
        FreeTank => "free_tank",
        FullToFull => "full_to_full",
        FullToEmpty => "full_to_empty",
    }
);

string_enum!(
    /// Size class of a car.
    CarRange {
        Mini => "mini",
        Midi => "midi",
        Maxi => "maxi",
        Scooter => "scooter",
    }
);

string_enum!(
    Multimedia {
        Touchscreen => "touchscreen",
        Bluetooth => "bluetooth",
        AndroidAuto => "android_auto",
        AppleCarPlay => "apple_car_play",
    }
);

string_enum!(
    /// Mileage filter: limited cars have a positive `mileage`, unlimited use -1.
    Mileage {
        Limited => "limited",
        Unlimited => "unlimited",
    }
);

string_enum!(
    /// Application a request originates from.
    App {
        Admin => "admin",
        Frontend => "frontend",
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn stored_value_matches_serde_name() {
        for status in BookingStatus::ALL {
            let json = serde_json::to_string(status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        for car_type in CarType::ALL {
            let json = serde_json::to_string(car_type).unwrap();
            assert_eq!(json, format!("\"{}\"", car_type.as_str()));
        }
        for multimedia in Multimedia::ALL {
            let json = serde_json::to_string(multimedia).unwrap();
            assert_eq!(json, format!("\"{}\"", multimedia.as_str()));
        }
    }

    #[test]
    fn rejects_unknown_value() {
        assert!(UserType::from_str("root").is_err());
        assert_eq!(FuelPolicy::from_str("free_tank"), Ok(FuelPolicy::FreeTank));
    }
}
