//! The fixed itinerary returned when no generation backend is configured.

use chrono::{Days, NaiveDate, TimeZone, Utc};

use super::trip::{
    Activity, ActivityCategory, DayPlan, Itinerary, Pace, TimeOfDay, TripConstraints,
    TripProfile, WalkingTolerance,
};

pub const SAMPLE_ITINERARY_ID: &str = "demo-kyoto-3-days";

fn sample_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 1).expect("sample start date is a valid calendar date")
}

struct Spot {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: ActivityCategory,
    neighborhood: &'static str,
    minutes: u32,
    cost: f64,
    tags: &'static [&'static str],
}

impl Spot {
    fn at(&self, time_of_day: TimeOfDay) -> Activity {
        Activity {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            category: self.category,
            neighborhood: self.neighborhood.to_string(),
            duration_minutes: self.minutes,
            cost_estimate: self.cost,
            tags: self.tags.iter().map(|tag| tag.to_string()).collect(),
            time_of_day,
        }
    }
}

fn day(index: u32, morning: &[Spot], afternoon: &[Spot], evening: &[Spot]) -> DayPlan {
    let mut plan = DayPlan {
        day_index: index,
        date: sample_start() + Days::new(u64::from(index)),
        morning_activities: morning.iter().map(|s| s.at(TimeOfDay::Morning)).collect(),
        afternoon_activities: afternoon.iter().map(|s| s.at(TimeOfDay::Afternoon)).collect(),
        evening_activities: evening.iter().map(|s| s.at(TimeOfDay::Evening)).collect(),
        daily_budget: 0.0,
    };
    plan.daily_budget = plan.activity_cost();
    plan
}

/// A three-day Kyoto trip. Daily budgets are the exact sums of their
/// activities and the total is the sum of the daily budgets.
pub fn sample_itinerary() -> Itinerary {
    let profile = TripProfile {
        origin: "San Francisco".to_string(),
        destinations: vec!["Kyoto".to_string()],
        start_date: sample_start(),
        end_date: sample_start() + Days::new(3),
        budget_min: 600.0,
        budget_max: 1200.0,
        currency: "USD".to_string(),
        pace: Pace::Balanced,
        interests: vec!["culture".into(), "food".into(), "nature".into()],
        constraints: TripConstraints {
            dietary: Vec::new(),
            walking_tolerance: WalkingTolerance::Medium,
            must_see_items: vec!["Fushimi Inari Taisha".to_string()],
            additional_notes: String::new(),
        },
    };

    let days = vec![
        day(
            0,
            &[
                Spot {
                    id: "kyo-fushimi-inari",
                    name: "Fushimi Inari Taisha",
                    description: "Walk the tunnel of vermilion torii gates up Mount Inari before the crowds arrive.",
                    category: ActivityCategory::Culture,
                    neighborhood: "Fushimi",
                    minutes: 150,
                    cost: 0.0,
                    tags: &["shrine", "hike", "iconic"],
                },
                Spot {
                    id: "kyo-inari-street-food",
                    name: "Inari street snacks",
                    description: "Kitsune udon and grilled mochi from the stalls at the shrine entrance.",
                    category: ActivityCategory::Food,
                    neighborhood: "Fushimi",
                    minutes: 45,
                    cost: 12.5,
                    tags: &["street food"],
                },
            ],
            &[
                Spot {
                    id: "kyo-tofukuji",
                    name: "Tofuku-ji",
                    description: "Zen temple complex known for its wooden bridge and raked gravel gardens.",
                    category: ActivityCategory::Sight,
                    neighborhood: "Higashiyama",
                    minutes: 90,
                    cost: 7.0,
                    tags: &["temple", "garden"],
                },
                Spot {
                    id: "kyo-sake-fushimi",
                    name: "Gekkeikan Okura Sake Museum",
                    description: "Brewery museum with a short tasting of local sake.",
                    category: ActivityCategory::Culture,
                    neighborhood: "Fushimi",
                    minutes: 75,
                    cost: 5.0,
                    tags: &["sake", "museum"],
                },
            ],
            &[Spot {
                id: "kyo-pontocho-dinner",
                name: "Dinner in Pontocho Alley",
                description: "Kyo-ryori set menu in a lantern-lit lane above the Kamo River.",
                category: ActivityCategory::Food,
                neighborhood: "Pontocho",
                minutes: 120,
                cost: 65.0,
                tags: &["kaiseki", "riverside"],
            }],
        ),
        day(
            1,
            &[
                Spot {
                    id: "kyo-arashiyama-bamboo",
                    name: "Arashiyama Bamboo Grove",
                    description: "Early stroll through the towering bamboo paths.",
                    category: ActivityCategory::Nature,
                    neighborhood: "Arashiyama",
                    minutes: 60,
                    cost: 0.0,
                    tags: &["nature", "photo"],
                },
                Spot {
                    id: "kyo-tenryuji",
                    name: "Tenryu-ji",
                    description: "UNESCO-listed temple with a pond garden framed by the western hills.",
                    category: ActivityCategory::Sight,
                    neighborhood: "Arashiyama",
                    minutes: 75,
                    cost: 6.5,
                    tags: &["temple", "garden", "unesco"],
                },
            ],
            &[
                Spot {
                    id: "kyo-shigetsu-lunch",
                    name: "Shojin ryori lunch",
                    description: "Buddhist vegetarian lunch served inside the temple grounds.",
                    category: ActivityCategory::Food,
                    neighborhood: "Arashiyama",
                    minutes: 60,
                    cost: 30.0,
                    tags: &["vegetarian", "temple food"],
                },
                Spot {
                    id: "kyo-hozugawa",
                    name: "Hozugawa river boat",
                    description: "Traditional flat-bottomed boat ride through the gorge.",
                    category: ActivityCategory::Activity,
                    neighborhood: "Arashiyama",
                    minutes: 120,
                    cost: 30.0,
                    tags: &["boat", "scenic"],
                },
            ],
            &[Spot {
                id: "kyo-onsen",
                name: "Sagano onsen soak",
                description: "Unwind in a hot-spring bath after a day on foot.",
                category: ActivityCategory::Rest,
                neighborhood: "Arashiyama",
                minutes: 90,
                cost: 15.0,
                tags: &["onsen", "relax"],
            }],
        ),
        day(
            2,
            &[
                Spot {
                    id: "kyo-kiyomizu",
                    name: "Kiyomizu-dera",
                    description: "Hillside temple with a wooden stage overlooking the city.",
                    category: ActivityCategory::Sight,
                    neighborhood: "Higashiyama",
                    minutes: 90,
                    cost: 3.0,
                    tags: &["temple", "view"],
                },
                Spot {
                    id: "kyo-sannenzaka",
                    name: "Sannenzaka and Ninenzaka",
                    description: "Preserved stone lanes lined with tea houses and craft shops.",
                    category: ActivityCategory::Shopping,
                    neighborhood: "Higashiyama",
                    minutes: 60,
                    cost: 20.0,
                    tags: &["crafts", "historic"],
                },
            ],
            &[
                Spot {
                    id: "kyo-nishiki",
                    name: "Nishiki Market",
                    description: "Graze through pickles, tamagoyaki and yuba along the covered market.",
                    category: ActivityCategory::Food,
                    neighborhood: "Nakagyo",
                    minutes: 90,
                    cost: 25.0,
                    tags: &["market", "tasting"],
                },
                Spot {
                    id: "kyo-tea-ceremony",
                    name: "Tea ceremony",
                    description: "Hands-on matcha ceremony with a tea master.",
                    category: ActivityCategory::Culture,
                    neighborhood: "Gion",
                    minutes: 60,
                    cost: 40.0,
                    tags: &["matcha", "tradition"],
                },
            ],
            &[Spot {
                id: "kyo-gion-walk",
                name: "Gion evening walk",
                description: "Wander Hanamikoji and Shirakawa as the lanterns come on.",
                category: ActivityCategory::Nightlife,
                neighborhood: "Gion",
                minutes: 75,
                cost: 0.0,
                tags: &["historic", "evening"],
            }],
        ),
    ];

    let mut itinerary = Itinerary {
        id: SAMPLE_ITINERARY_ID.to_string(),
        trip_profile: profile,
        days,
        total_estimated_cost: 0.0,
        generated_at: Utc.from_utc_datetime(
            &sample_start()
                .and_hms_opt(9, 0, 0)
                .expect("09:00:00 is a valid time"),
        ),
        summary: "Three unhurried days in Kyoto: torii-lined mountain trails in Fushimi, \
                  bamboo groves and river gorges in Arashiyama, and the lanes of Higashiyama \
                  and Gion, with temple food, market grazing and a tea ceremony along the way."
            .to_string(),
    };
    itinerary.total_estimated_cost = itinerary.recompute_total();
    itinerary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_deterministic() {
        assert_eq!(sample_itinerary(), sample_itinerary());
    }

    #[test]
    fn test_sample_satisfies_invariants() {
        let itinerary = sample_itinerary();
        let profile = &itinerary.trip_profile;

        assert!(profile.budget_min <= profile.budget_max);
        assert_eq!(itinerary.day_count(), profile.day_count() as usize);

        for (index, day) in itinerary.days.iter().enumerate() {
            assert_eq!(day.day_index as usize, index);
            assert_eq!(day.date, profile.start_date + Days::new(index as u64));
            assert_eq!(day.daily_budget, day.activity_cost());
            assert!(day.activities().all(|a| a.duration_minutes > 0 && a.cost_estimate >= 0.0));
        }

        assert_eq!(itinerary.total_estimated_cost, itinerary.recompute_total());
        assert!(itinerary.total_estimated_cost <= profile.budget_max);
    }

    #[test]
    fn test_sample_activity_ids_are_unique() {
        let itinerary = sample_itinerary();
        let mut ids: Vec<&str> = itinerary
            .days
            .iter()
            .flat_map(|d| d.activities())
            .map(|a| a.id.as_str())
            .collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }
}
