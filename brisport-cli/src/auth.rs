//! Registration, credential checks and in-process session tokens. The
//! operations core never sees passwords or tokens; it consumes the
//! validated `User` records this service produces.

use std::collections::HashMap;

use brisport_catalog::{validate, ValidationError};
use brisport_shared::{Role, User};
use brisport_store::{StoreError, UserRepo};
use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct AuthService {
    users: UserRepo,
    sessions: HashMap<String, String>,
}

impl AuthService {
    pub fn new() -> Self {
        Self::default()
    }

    fn hash_password(password: &str) -> String {
        hex::encode(Sha256::digest(password.as_bytes()))
    }

    fn check_base(
        name: &str,
        age: u8,
        email: &str,
        mobile: &str,
        password: &str,
    ) -> Result<(), ValidationError> {
        if !validate::valid_name(name) {
            return Err(ValidationError::InvalidName);
        }
        if !validate::valid_age(age) {
            return Err(ValidationError::InvalidAge);
        }
        if !validate::valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }
        if !validate::valid_mobile(mobile) {
            return Err(ValidationError::InvalidMobile);
        }
        if !validate::valid_password(password) {
            return Err(ValidationError::WeakPassword);
        }
        Ok(())
    }

    pub fn register_traveller(
        &mut self,
        name: &str,
        age: u8,
        email: &str,
        mobile: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        Self::check_base(name, age, email, mobile, password)?;
        let user =
            User::new(name, age, email, mobile, Self::hash_password(password), Role::Traveller);
        self.users.add(user)?;
        Ok(())
    }

    pub fn register_frequent_flyer(
        &mut self,
        name: &str,
        age: u8,
        email: &str,
        mobile: &str,
        password: &str,
        number: u32,
        points: u32,
    ) -> Result<(), AuthError> {
        Self::check_base(name, age, email, mobile, password)?;
        if !validate::valid_frequent_flyer_number(number) {
            return Err(ValidationError::InvalidFrequentFlyerNumber.into());
        }
        if !validate::valid_frequent_flyer_points(points) {
            return Err(ValidationError::InvalidPointsBalance.into());
        }
        let user = User::new(
            name,
            age,
            email,
            mobile,
            Self::hash_password(password),
            Role::FrequentFlyer { number, points },
        );
        self.users.add(user)?;
        Ok(())
    }

    pub fn register_manager(
        &mut self,
        name: &str,
        age: u8,
        email: &str,
        mobile: &str,
        password: &str,
        staff_id: &str,
    ) -> Result<(), AuthError> {
        Self::check_base(name, age, email, mobile, password)?;
        if staff_id.trim().is_empty() {
            return Err(ValidationError::InvalidStaffId.into());
        }
        let user = User::new(
            name,
            age,
            email,
            mobile,
            Self::hash_password(password),
            Role::FlightManager { staff_id: staff_id.to_string() },
        );
        self.users.add(user)?;
        Ok(())
    }

    pub fn email_registered(&self, email: &str) -> bool {
        self.users.get(email).is_some()
    }

    pub fn check_password(&self, email: &str, password: &str) -> bool {
        self.users
            .get(email)
            .map(|u| u.password_hash == Self::hash_password(password))
            .unwrap_or(false)
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<String, AuthError> {
        let user = self.users.get(email).ok_or(AuthError::InvalidCredentials)?;
        if user.password_hash != Self::hash_password(password) {
            return Err(AuthError::InvalidCredentials);
        }
        let token = Uuid::new_v4().simple().to_string();
        tracing::info!(email = %user.email, "session opened");
        self.sessions.insert(token.clone(), user.email.clone());
        Ok(token)
    }

    pub fn logout(&mut self, token: &str) {
        if let Some(email) = self.sessions.remove(token) {
            tracing::info!(%email, "session closed");
        }
    }

    pub fn session_user(&self, token: &str) -> Option<&User> {
        self.sessions.get(token).and_then(|email| self.users.get(email))
    }

    pub fn session_user_mut(&mut self, token: &str) -> Option<&mut User> {
        let email = self.sessions.get(token)?.clone();
        self.users.get_mut(&email)
    }

    pub fn change_password(
        &mut self,
        email: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        if !validate::valid_password(new_password) {
            return Err(ValidationError::WeakPassword.into());
        }
        let user = self.users.get_mut(email).ok_or(AuthError::UnknownUser)?;
        if user.password_hash != Self::hash_password(old_password) {
            return Err(AuthError::PasswordMismatch);
        }
        user.password_hash = Self::hash_password(new_password);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("no such user")]
    UnknownUser,

    #[error("entered password does not match the existing password")]
    PasswordMismatch,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
