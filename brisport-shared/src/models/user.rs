use serde::{Deserialize, Serialize};

/// Role payload for a registered user. Privileges are exposed as explicit
/// predicates on [`User`] rather than through dispatch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Traveller,
    FrequentFlyer { number: u32, points: u32 },
    FlightManager { staff_id: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub age: u8,
    pub email: String,
    pub mobile: String,
    pub password_hash: String,
    pub role: Role,
}

impl User {
    pub fn new(
        name: &str,
        age: u8,
        email: &str,
        mobile: &str,
        password_hash: String,
        role: Role,
    ) -> Self {
        Self {
            name: name.to_string(),
            age,
            email: email.to_string(),
            mobile: mobile.to_string(),
            password_hash,
            role,
        }
    }

    /// Frequent flyers may take an occupied seat from its current holder.
    pub fn has_displacement_privilege(&self) -> bool {
        matches!(self.role, Role::FrequentFlyer { .. })
    }

    /// Only frequent flyers accrue loyalty points on booking.
    pub fn earns_points(&self) -> bool {
        matches!(self.role, Role::FrequentFlyer { .. })
    }

    pub fn can_manage_flights(&self) -> bool {
        matches!(self.role, Role::FlightManager { .. })
    }

    /// Current points balance, for frequent flyers only.
    pub fn points(&self) -> Option<u32> {
        match self.role {
            Role::FrequentFlyer { points, .. } => Some(points),
            _ => None,
        }
    }

    /// No-op for roles without a points balance.
    pub fn add_points(&mut self, earned: u32) {
        if let Role::FrequentFlyer { ref mut points, .. } = self.role {
            *points += earned;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_capabilities() {
        let traveller = User::new("Ada", 35, "ada@example.com", "0400000001", String::new(), Role::Traveller);
        assert!(!traveller.has_displacement_privilege());
        assert!(!traveller.earns_points());
        assert_eq!(traveller.points(), None);

        let flyer = User::new(
            "Grace",
            41,
            "grace@example.com",
            "0400000002",
            String::new(),
            Role::FrequentFlyer { number: 123456, points: 500 },
        );
        assert!(flyer.has_displacement_privilege());
        assert!(flyer.earns_points());
        assert!(!flyer.can_manage_flights());
        assert_eq!(flyer.points(), Some(500));

        let manager = User::new(
            "Alan",
            50,
            "alan@example.com",
            "0400000003",
            String::new(),
            Role::FlightManager { staff_id: "4001".to_string() },
        );
        assert!(manager.can_manage_flights());
        assert!(!manager.earns_points());
    }

    #[test]
    fn test_points_accumulate_only_for_frequent_flyers() {
        let mut flyer = User::new(
            "Grace",
            41,
            "grace@example.com",
            "0400000002",
            String::new(),
            Role::FrequentFlyer { number: 123456, points: 100 },
        );
        flyer.add_points(1200);
        assert_eq!(flyer.points(), Some(1300));

        let mut traveller =
            User::new("Ada", 35, "ada@example.com", "0400000001", String::new(), Role::Traveller);
        traveller.add_points(1200);
        assert_eq!(traveller.points(), None);
    }
}
