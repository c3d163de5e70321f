//! Deterministic demo roster generation.
//!
//! Used by the runner to seed an empty database so a month can be
//! generated without hand-entering employees. Same seed, same roster.

use crate::{
    model::{NewEmployee, Role},
    rng::{RngBank, RngStream, ShiftRng},
};

const FAMILY_NAMES: &[&str] = &[
    "Sato", "Suzuki", "Takahashi", "Tanaka", "Ito", "Watanabe", "Yamamoto", "Nakamura",
    "Kobayashi", "Kato", "Yoshida", "Yamada", "Sasaki", "Yamaguchi", "Matsumoto", "Inoue",
    "Kimura", "Hayashi", "Shimizu", "Mori",
];

const GIVEN_NAMES: &[&str] = &[
    "Haruto", "Yui", "Sota", "Aoi", "Yuto", "Hina", "Riku", "Mei", "Kaito", "Sakura",
    "Ren", "Yuna", "Hiroshi", "Akiko", "Takumi", "Emi", "Daiki", "Nanami", "Kenta", "Rin",
];

/// Hourly rates in yen by role: (base, spread in 50-yen steps).
fn rate_range(role: Role) -> (u32, usize) {
    match role {
        Role::Manager => (1600, 9),
        Role::Staff => (1250, 7),
        Role::Part => (1050, 5),
    }
}

pub struct NameGenerator;

impl NameGenerator {
    pub fn full_name(rng: &mut ShiftRng) -> String {
        let family = rng.pick(FAMILY_NAMES);
        let given = rng.pick(GIVEN_NAMES);
        format!("{family} {given}")
    }
}

/// `n` employees: roughly one manager per five, a third staff, the rest
/// part-timers, each with a plausible hourly rate.
pub fn demo_roster(n: usize, seed: u64) -> Vec<NewEmployee> {
    let mut rng = RngBank::new(seed).for_stream(RngStream::DemoRoster);
    let managers = n.div_ceil(5);
    let staff = (n - managers) / 3;

    (0..n)
        .map(|i| {
            let role = if i < managers {
                Role::Manager
            } else if i < managers + staff {
                Role::Staff
            } else {
                Role::Part
            };
            let (base, spread) = rate_range(role);
            let mut e = NewEmployee::new(NameGenerator::full_name(&mut rng), role);
            e.hourly_rate = Some(base + 50 * rng.below(spread) as u32);
            e
        })
        .collect()
}
