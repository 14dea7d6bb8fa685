//! Interactive menu flows. Each flow validates input locally, calls into
//! the auth or operations service, renders the outcome and loops.

use anyhow::Result;
use brisport_catalog::{reference, validate};
use brisport_ops::FlightOps;
use brisport_shared::{Direction, Role};

use crate::auth::AuthService;
use crate::ui;

pub struct AirportConsole {
    auth: AuthService,
    ops: FlightOps,
}

impl AirportConsole {
    pub fn new() -> Self {
        Self { auth: AuthService::new(), ops: FlightOps::new() }
    }

    pub fn run(&mut self) -> Result<()> {
        ui::banner();
        loop {
            ui::line("Please make a choice from the menu below:");
            ui::line("1. Login as a registered user.");
            ui::line("2. Register as a new user.");
            ui::line("3. Exit.");
            match ui::ask_choice("Please enter a choice between 1 and 3:", 1, 3)? {
                1 => self.login_flow()?,
                2 => self.register_flow()?,
                _ => {
                    ui::line("Thank you. Safe travels.");
                    return Ok(());
                }
            }
        }
    }

    // ----- registration -----

    fn register_flow(&mut self) -> Result<()> {
        ui::line("Which user type would you like to register?");
        ui::line("1. A standard traveller.");
        ui::line("2. A frequent flyer.");
        ui::line("3. A flight manager.");
        match ui::ask_choice("Please enter a choice between 1 and 3:", 1, 3)? {
            1 => self.register_traveller_flow(),
            2 => self.register_frequent_flyer_flow(),
            _ => self.register_manager_flow(),
        }
    }

    fn register_traveller_flow(&mut self) -> Result<()> {
        ui::line("Registering as a traveller.");
        let (name, age, mobile, email, password) = self.ask_user_basics()?;
        match self.auth.register_traveller(&name, age, &email, &mobile, &password) {
            Ok(()) => ui::line(&format!("Congratulations {name}. You have registered as a traveller.")),
            Err(err) => ui::error(&err.to_string()),
        }
        Ok(())
    }

    fn register_frequent_flyer_flow(&mut self) -> Result<()> {
        ui::line("Registering as a frequent flyer.");
        let (name, age, mobile, email, password) = self.ask_user_basics()?;

        let number = loop {
            ui::line("Please enter in your frequent flyer number between 100000 and 999999:");
            let s = ui::read_non_empty()?;
            match s.trim().parse::<u32>() {
                Ok(n) if validate::valid_frequent_flyer_number(n) => break n,
                _ => ui::error("Supplied frequent flyer number is invalid."),
            }
        };
        let points =
            ui::ask_int("Please enter in your current frequent flyer points between 0 and 1000000:", 0, 1_000_000)?;

        match self.auth.register_frequent_flyer(&name, age, &email, &mobile, &password, number, points) {
            Ok(()) => ui::line(&format!("Congratulations {name}. You have registered as a frequent flyer.")),
            Err(err) => ui::error(&err.to_string()),
        }
        Ok(())
    }

    fn register_manager_flow(&mut self) -> Result<()> {
        ui::line("Registering as a flight manager.");
        let (name, age, mobile, email, password) = self.ask_user_basics()?;

        let staff_id = loop {
            ui::line("Please enter in your staff id between 1000 and 9000:");
            let s = ui::read_non_empty()?;
            match s.trim().parse::<u32>() {
                Ok(n) if (1000..=9000).contains(&n) => break s.trim().to_string(),
                _ => ui::error("Supplied staff id is invalid."),
            }
        };

        match self.auth.register_manager(&name, age, &email, &mobile, &password, &staff_id) {
            Ok(()) => ui::line(&format!("Congratulations {name}. You have registered as a flight manager.")),
            Err(err) => ui::error(&err.to_string()),
        }
        Ok(())
    }

    fn ask_user_basics(&self) -> Result<(String, u8, String, String, String)> {
        let name = loop {
            ui::line("Please enter in your name:");
            let s = ui::read_non_empty()?;
            if validate::valid_name(&s) {
                break s;
            }
            ui::error("Supplied name is invalid.");
        };

        let age = loop {
            ui::line("Please enter in your age between 0 and 99:");
            let s = ui::read_line()?;
            match s.trim().parse::<u8>() {
                Ok(a) if validate::valid_age(a) => break a,
                Ok(_) => ui::error("Supplied age is invalid."),
                Err(_) => ui::error("Supplied value is invalid."),
            }
        };

        let mobile = loop {
            ui::line("Please enter in your mobile number:");
            let s = ui::read_non_empty()?;
            if validate::valid_mobile(&s) {
                break s;
            }
            ui::error("Supplied mobile number is invalid.");
        };

        let email = loop {
            ui::line("Please enter in your email:");
            let s = ui::read_non_empty()?;
            if !validate::valid_email(&s) {
                ui::error("Supplied email is invalid.");
                continue;
            }
            if self.auth.email_registered(&s) {
                ui::error("Email already registered.");
                continue;
            }
            break s;
        };

        let password = loop {
            ui::line("Please enter in your password:");
            ui::password_rules();
            let s = ui::read_line()?;
            if validate::valid_password(&s) {
                break s;
            }
            ui::error("Supplied password is invalid.");
        };

        Ok((name, age, mobile, email, password))
    }

    // ----- login and role menus -----

    fn login_flow(&mut self) -> Result<()> {
        ui::line("Login Menu.");
        ui::line("Please enter in your email:");
        let email = ui::read_non_empty()?;
        if !validate::valid_email(&email) {
            ui::error("Supplied email is invalid.");
            return Ok(());
        }
        if !self.auth.email_registered(&email) {
            ui::error_brief("Email is not registered.");
            return Ok(());
        }

        let password = loop {
            ui::line("Please enter in your password:");
            let pwd = ui::read_non_empty()?;
            if !validate::valid_password(&pwd) {
                ui::error("Supplied password is invalid.");
                continue;
            }
            if !self.auth.check_password(&email, &pwd) {
                ui::error_brief("Incorrect Password.");
                continue;
            }
            break pwd;
        };

        match self.auth.login(&email, &password) {
            Ok(token) => {
                let Some(user) = self.auth.session_user(&token) else { return Ok(()) };
                let name = user.name.clone();
                let is_manager = user.can_manage_flights();
                ui::line(&format!("Welcome back {name}."));
                if is_manager {
                    self.manager_menu(&token)?;
                } else {
                    self.traveller_menu(&token)?;
                }
            }
            Err(_) => ui::error("Invalid credentials"),
        }
        Ok(())
    }

    /// Shared by travellers and frequent flyers; the menus are identical.
    fn traveller_menu(&mut self, token: &str) -> Result<()> {
        let heading = match self.auth.session_user(token).map(|u| u.has_displacement_privilege()) {
            Some(true) => "Frequent Flyer Menu.",
            _ => "Traveller Menu.",
        };
        loop {
            ui::line("");
            ui::line(heading);
            ui::line("Please make a choice from the menu below:");
            ui::line("1. See my details.");
            ui::line("2. Change password.");
            ui::line("3. Book an arrival flight.");
            ui::line("4. Book a departure flight.");
            ui::line("5. See flight details.");
            ui::line("6. Logout.");
            match ui::ask_choice("Please enter a choice between 1 and 6:", 1, 6)? {
                1 => self.show_me(token),
                2 => self.change_password_flow(token)?,
                3 => self.book_flow(token, Direction::Arrival)?,
                4 => self.book_flow(token, Direction::Departure)?,
                5 => self.list_flights(),
                _ => {
                    self.auth.logout(token);
                    return Ok(());
                }
            }
        }
    }

    fn manager_menu(&mut self, token: &str) -> Result<()> {
        loop {
            ui::line("");
            ui::line("Flight Manager Menu.");
            ui::line("Please make a choice from the menu below:");
            ui::line("1. See my details.");
            ui::line("2. Change password.");
            ui::line("3. Create an arrival flight.");
            ui::line("4. Create a departure flight.");
            ui::line("5. Delay an arrival flight.");
            ui::line("6. Delay a departure flight.");
            ui::line("7. See the details of all flights.");
            ui::line("8. Logout.");
            match ui::ask_choice("Please enter a choice between 1 and 8:", 1, 8)? {
                1 => self.show_all_flights(),
                2 => self.change_password_flow(token)?,
                3 => self.add_flight_flow(token, Direction::Arrival)?,
                4 => self.add_flight_flow(token, Direction::Departure)?,
                5 => self.delay_flow(token, Direction::Arrival)?,
                6 => self.delay_flow(token, Direction::Departure)?,
                7 => self.show_all_flights(),
                _ => {
                    self.auth.logout(token);
                    return Ok(());
                }
            }
        }
    }

    // ----- traveller actions -----

    fn show_me(&self, token: &str) {
        let Some(user) = self.auth.session_user(token) else { return };
        ui::line("Your details.");
        ui::line(&format!("Name: {}", user.name));
        ui::line(&format!("Age: {}", user.age));
        ui::line(&format!("Mobile phone number: {}", user.mobile));
        ui::line(&format!("Email: {}", user.email));
        if let Role::FrequentFlyer { number, points } = user.role {
            ui::line(&format!("Frequent flyer number: {number}"));
            ui::line(&format!("Points: {points}"));
        }
    }

    fn change_password_flow(&mut self, token: &str) -> Result<()> {
        let Some(email) = self.auth.session_user(token).map(|u| u.email.clone()) else {
            return Ok(());
        };
        ui::line("Please enter your current password.");
        let old = ui::read_line()?;
        ui::line("Please enter your new password.");
        let new = loop {
            let s = ui::read_non_empty()?;
            if validate::valid_password(&s) {
                break s;
            }
            ui::error("Supplied password is invalid.");
        };
        if let Err(err) = self.auth.change_password(&email, &old, &new) {
            ui::error(&err.to_string());
        }
        Ok(())
    }

    fn book_flow(&mut self, token: &str, direction: Direction) -> Result<()> {
        loop {
            ui::line(match direction {
                Direction::Arrival => "Please enter in the arrival flight code:",
                Direction::Departure => "Please enter in the departure flight code:",
            });
            let code = ui::read_non_empty()?.to_uppercase();
            ui::line("Please enter in your preferred seat (or press enter for auto):");
            let seat_input = ui::read_line()?;
            let seat = seat_input.trim();
            let seat = (!seat.is_empty()).then(|| seat.to_uppercase());

            let Some(user) = self.auth.session_user_mut(token) else { return Ok(()) };
            let outcome = match direction {
                Direction::Arrival => self.ops.book_arrival(user, &code, seat.as_deref()),
                Direction::Departure => self.ops.book_departure(user, &code, seat.as_deref()),
            };
            match outcome {
                Ok(ticket) => {
                    ui::line(&ui::render_ticket(&ticket));
                    return Ok(());
                }
                Err(err) => ui::error(&err.to_string()),
            }
        }
    }

    fn list_flights(&self) {
        let flights = self.ops.list_flights();
        if flights.is_empty() {
            ui::line("No flights available.");
            return;
        }
        ui::line("========== Flight Information ==========");
        for (i, flight) in flights.iter().enumerate() {
            ui::line(&format!("Flight {}:", i + 1));
            ui::line(&ui::render_flight_row(flight));
            if i + 1 < flights.len() {
                ui::line("------------------------");
            }
        }
        ui::line("=======================================");
    }

    // ----- manager actions -----

    fn show_all_flights(&self) {
        let flights = self.ops.list_flights();
        let arrivals: Vec<_> =
            flights.iter().filter(|f| f.direction == Direction::Arrival).collect();
        let departures: Vec<_> =
            flights.iter().filter(|f| f.direction == Direction::Departure).collect();

        ui::line("");
        ui::line("Arrival Flights:");
        if arrivals.is_empty() {
            ui::line("There are no arrival flights.");
        }
        for flight in arrivals {
            ui::line(&ui::flight_sentence(flight));
        }

        ui::line("Departure Flights:");
        if departures.is_empty() {
            ui::line("There are no departure flights.");
        }
        for flight in departures {
            ui::line(&ui::flight_sentence(flight));
        }
    }

    fn add_flight_flow(&mut self, token: &str, direction: Direction) -> Result<()> {
        ui::line("Please enter in the airline:");
        for (i, airline) in reference::AIRLINES.iter().enumerate() {
            ui::line(&format!("{}. {}", i + 1, airline.name));
        }
        let pick = ui::ask_choice("Please enter a choice between 1 and 5:", 1, reference::AIRLINES.len() as u32)?;
        let airline = reference::AIRLINES[pick as usize - 1].code;

        ui::line(match direction {
            Direction::Arrival => "Please enter the departure city:",
            Direction::Departure => "Please enter in the arrival city:",
        });
        for (i, (city, _)) in reference::CITY_POINTS.iter().enumerate() {
            ui::line(&format!("{}. {}", i + 1, city));
        }
        let pick = ui::ask_choice("Please enter a choice between 1 and 5:", 1, reference::CITY_POINTS.len() as u32)?;
        let city = reference::CITY_POINTS[pick as usize - 1].0;

        let code = loop {
            ui::line("Please enter in the flight id:");
            let s = ui::read_non_empty()?.to_uppercase();
            if validate::valid_flight_code(&s) && s.starts_with(airline) {
                break s;
            }
            ui::error("Supplied flight code is invalid.");
        };
        let plane_id = loop {
            ui::line("Please enter in the plane id:");
            let s = ui::read_non_empty()?.to_uppercase();
            if validate::valid_plane_id(&s) && s.starts_with(airline) {
                break s;
            }
            ui::error("Supplied plane id is invalid.");
        };
        let when =
            ui::ask_datetime("Please enter in the date and time in format HH:mm dd/MM/yyyy:")?;

        let Some(manager) = self.auth.session_user(token) else { return Ok(()) };
        let outcome = match direction {
            Direction::Arrival => {
                self.ops.register_arrival(manager, airline, &code, city, &plane_id, when)
            }
            Direction::Departure => {
                self.ops.register_departure(manager, airline, &code, city, &plane_id, when)
            }
        };
        match outcome {
            Ok(flight) => ui::line(&format!(
                "Flight {} on plane {} has been added to the system.",
                flight.code, flight.plane_id
            )),
            Err(err) => ui::error(&err.to_string()),
        }
        Ok(())
    }

    fn delay_flow(&mut self, token: &str, direction: Direction) -> Result<()> {
        ui::line(match direction {
            Direction::Arrival => "Please enter in the arrival flight code:",
            Direction::Departure => "Please enter in the departure flight code:",
        });
        let code = ui::read_non_empty()?.to_uppercase();
        let minutes = ui::ask_int("Please enter in the delay minutes:", 1, u32::MAX)?;

        let Some(manager) = self.auth.session_user(token) else { return Ok(()) };
        let outcome = match direction {
            Direction::Arrival => self.ops.delay_arrival(manager, &code, minutes),
            Direction::Departure => self.ops.delay_departure(manager, &code, minutes),
        };
        match outcome {
            Ok(()) => ui::line(match direction {
                Direction::Arrival => "Arrival delayed and linked departures adjusted.",
                Direction::Departure => "Departure delayed.",
            }),
            Err(err) => ui::error(&err.to_string()),
        }
        Ok(())
    }
}
