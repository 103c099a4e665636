use crate::models::{Scenario, Tone};

const WORK: [&str; 3] = [
    "I have a sudden family emergency that requires my immediate attention.",
    "I'm unwell and need to visit a doctor today.",
    "My car broke down, and I'm waiting for roadside assistance.",
];

const SCHOOL: [&str; 3] = [
    "I missed the bus and won't make it to class on time.",
    "I had a medical appointment that ran longer than expected.",
    "I was helping a family member with an urgent matter.",
];

const SOCIAL: [&str; 3] = [
    "I got caught up with some unexpected work and can't make it.",
    "I'm feeling under the weather and need to rest.",
    "A last-minute family obligation came up.",
];

const FAMILY: [&str; 3] = [
    "I have to attend an urgent appointment.",
    "I'm dealing with a personal issue that needs my attention.",
    "I got delayed due to transportation issues.",
];

pub fn excuses_for(scenario: Scenario) -> &'static [&'static str] {
    match scenario {
        Scenario::Work => &WORK,
        Scenario::School => &SCHOOL,
        Scenario::Social => &SOCIAL,
        Scenario::Family => &FAMILY,
    }
}

pub fn apology_for(tone: Tone) -> &'static str {
    match tone {
        Tone::Professional => {
            "I sincerely apologize for any inconvenience caused. Please let me know how I can make this right."
        }
        Tone::Emotional => {
            "I'm so sorry for letting you down. I feel terrible about this and hope you understand."
        }
    }
}
