use crate::{ExecLog, LoggingDriver};

use chrono::{NaiveDate, NaiveDateTime};
use roster::{
    db::ConnectionGuard,
    model::{Address, Appointment, City, Country, Customer, User, UserStatus},
    Actor, Db, Entity, Record, Reference,
};
use roster_driver_sqlite::Sqlite;

/// An in-memory database with the entity tables created, and optionally
/// seeded with a small known data set.
pub struct Fixture {
    pub db: Db,
    pub log: ExecLog,

    /// The user tests act as. Seed data is written by [`Seed::ACTOR`].
    pub actor: Actor,
}

/// Keys and contents of the seeded rows.
pub struct Seed;

impl Seed {
    pub const ACTOR: &'static str = "seed";

    pub const COUNTRIES: [&'static str; 5] =
        ["United States", "Canada", "Mexico", "United Kingdom", "Germany"];

    /// `(name, country key)`
    pub const CITIES: [(&'static str, i32); 4] =
        [("New York", 1), ("Toronto", 2), ("London", 4), ("Berlin", 5)];

    /// `(street, city key)`
    pub const ADDRESSES: [(&'static str, i32); 7] = [
        ("1 Main St", 1),
        ("2 Front St", 2),
        ("3 Baker St", 3),
        ("4 Unter den Linden", 4),
        ("5 Broadway", 1),
        ("6 Yonge St", 2),
        ("7 Oxford St", 3),
    ];

    /// `(name, address key, active)`
    pub const CUSTOMERS: [(&'static str, i32, bool); 6] = [
        ("Alice", 7, true),
        ("Bob", 7, false),
        ("Carol", 1, true),
        ("Dave", 7, true),
        ("Erin", 2, false),
        ("Frank", 4, true),
    ];

    /// `(user name, status)`
    pub const USERS: [(&'static str, UserStatus); 3] = [
        ("admin", UserStatus::Admin),
        ("jdoe", UserStatus::Normal),
        ("retired", UserStatus::Inactive),
    ];

    /// `(title, customer key, user key, day of March 2024, start hour, hours)`
    pub const APPOINTMENTS: [(&'static str, i32, i32, u32, u32, u32); 4] = [
        ("Kickoff", 1, 1, 4, 9, 1),
        ("Review", 3, 2, 4, 14, 2),
        ("Planning", 1, 2, 5, 10, 1),
        ("Retro", 6, 1, 8, 16, 1),
    ];

    pub fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .expect("valid seed timestamp")
    }
}

impl Fixture {
    /// Tables created, nothing inserted.
    pub fn empty() -> Fixture {
        crate::init_logging();

        let driver = LoggingDriver::new(Sqlite::in_memory());
        let log = ExecLog::new(driver.ops_log_handle());
        let db = Db::builder().build(driver).expect("connect to in-memory sqlite");
        db.push_schema().expect("create tables");

        Fixture {
            db,
            log,
            actor: Actor::new("tester"),
        }
    }

    /// Tables created and seeded. The log starts out empty.
    pub fn seeded() -> Fixture {
        let mut fixture = Fixture::empty();
        fixture.seed();
        fixture.log.clear();
        fixture
    }

    pub fn cx(&self) -> ConnectionGuard<'_> {
        self.db.connection()
    }

    /// Loads a record that must exist.
    #[track_caller]
    pub fn get<E: Entity>(&self, primary_key: i32) -> Record<E> {
        E::factory()
            .load_by_primary_key(&mut *self.cx(), primary_key)
            .expect("load by primary key")
            .unwrap_or_else(|| panic!("no {} {primary_key}", E::TABLE))
    }

    /// Saves a record, which must succeed.
    #[track_caller]
    pub fn save<E: Entity>(&self, record: &mut Record<E>) {
        E::factory()
            .save(&mut *self.cx(), record, &self.actor, false)
            .expect("save");
    }

    fn seed(&self) {
        let actor = Actor::new(Seed::ACTOR);
        let mut cx = self.cx();

        for name in Seed::COUNTRIES {
            let mut country = Record::<Country>::new(&actor);
            country.set_name(&actor, name).unwrap();
            Country::factory().save(&mut *cx, &mut country, &actor, false).unwrap();
        }

        for (name, country) in Seed::CITIES {
            let mut city = Record::<City>::new(&actor);
            city.set_name(&actor, name).unwrap();
            city.set_country(&actor, Reference::key(country)).unwrap();
            City::factory().save(&mut *cx, &mut city, &actor, false).unwrap();
        }

        for (index, (street, city)) in Seed::ADDRESSES.into_iter().enumerate() {
            let mut address = Record::<Address>::new(&actor);
            address.set_address1(&actor, street).unwrap();
            address.set_city(&actor, Reference::key(city)).unwrap();
            address.set_postal_code(&actor, format!("{:05}", index + 1)).unwrap();
            address.set_phone(&actor, format!("555-010{}", index + 1)).unwrap();
            Address::factory().save(&mut *cx, &mut address, &actor, false).unwrap();
        }

        for (name, address, active) in Seed::CUSTOMERS {
            let mut customer = Record::<Customer>::new(&actor);
            customer.set_name(&actor, name).unwrap();
            customer.set_address(&actor, Reference::key(address)).unwrap();
            customer.set_active(&actor, active).unwrap();
            Customer::factory().save(&mut *cx, &mut customer, &actor, false).unwrap();
        }

        for (name, status) in Seed::USERS {
            let mut user = Record::<User>::new(&actor);
            user.set_user_name(&actor, name).unwrap();
            user.set_password(&actor, format!("hash-of-{name}")).unwrap();
            user.set_status(&actor, status).unwrap();
            User::factory().save(&mut *cx, &mut user, &actor, false).unwrap();
        }

        for (title, customer, user, day, hour, hours) in Seed::APPOINTMENTS {
            let mut appointment = Record::<Appointment>::new(&actor);
            appointment.set_title(&actor, title).unwrap();
            appointment.set_customer(&actor, Reference::key(customer)).unwrap();
            appointment.set_user(&actor, Reference::key(user)).unwrap();
            appointment.set_kind(&actor, "meeting").unwrap();
            appointment.set_start(&actor, Seed::at(day, hour)).unwrap();
            appointment.set_end(&actor, Seed::at(day, hour + hours)).unwrap();
            Appointment::factory().save(&mut *cx, &mut appointment, &actor, false).unwrap();
        }
    }
}
