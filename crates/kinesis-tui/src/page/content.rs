//! Copy shown on the page

pub const HERO_KICKER: &str = "VISIONARY DIRECTOR & CEO";
pub const HERO_NAME: (&str, &str) = ("RAY", "DHARMA");
pub const HERO_SUBTITLE: &str = "HIKAYYARA CREATIVE  /  VISUAL ARCHITECT";

pub const LEAD_TICKER: [&str; 6] = [
    "Creative Direction",
    "Cinematography",
    "Brand Strategy",
    "Visual Architecture",
    "Motion Design",
    "Art Direction",
];

pub const TRAIL_TICKER: [&str; 6] = [
    "Visual Storytelling",
    "Ray Dharma",
    "Hikayyara Creative",
    "Bali Indonesia",
    "Cosplay Events",
    "Cinematic",
];

pub struct Stat {
    pub target: u64,
    pub suffix: &'static str,
    pub label: &'static str,
}

pub const STATS: [Stat; 4] = [
    Stat {
        target: 50,
        suffix: "+",
        label: "Projects Delivered",
    },
    Stat {
        target: 9,
        suffix: " yrs",
        label: "Experience",
    },
    Stat {
        target: 10,
        suffix: "+",
        label: "Brand Clients",
    },
    Stat {
        target: 50,
        suffix: "K+",
        label: "Reach Generated",
    },
];

pub const PROFILE_HEADING: &str = "Crafting visual worlds that move people.";
pub const PROFILE_BODY: &str = "Director and visual architect from Bali. \
Campaigns, music videos and event films built frame by frame.";

pub const PORTFOLIO_HEADING: &str = "Featured Works";
pub const PORTFOLIO_CAPTION: &str = "ARCHIVE 2026";

pub struct Work {
    pub title: &'static str,
    pub category: &'static str,
}

pub const WORKS: [Work; 6] = [
    Work {
        title: "Dharma Negara Alaya",
        category: "Cosplay Event / 7 Feb 2026",
    },
    Work {
        title: "Frieren & Himmel",
        category: "Cinematic Music Video",
    },
    Work {
        title: "Dharma Negara Alaya",
        category: "Cosplay Event / 8 Feb 2026",
    },
    Work {
        title: "Moonlight Effulgent",
        category: "The Beauty of My Wife Selvi",
    },
    Work {
        title: "KWB (Kpop Wibu Bali)",
        category: "Cosplay Event / 15 Feb 2026",
    },
    Work {
        title: "Dewata Renfaire",
        category: "Cosplay Event / 22 Feb 2026",
    },
];

pub const PRODUCTION_HEADING: &str = "IN PRODUCTION.";
pub const PRODUCTION_CAPTION: &str = "A GLIMPSE INTO THE DAILY RHYTHM & VISUAL STUDIES";
pub const INSTAGRAM_BUTTON: &str = "VISIT INSTAGRAM ↗";

pub const FOOTER_KICKER: &str = "GET IN TOUCH";
pub const FOOTER_TITLE: &str = "LET'S TALK.";
pub const FOOTER_LINKS: [&str; 2] = ["INSTAGRAM", "MAIL"];
pub const COPYRIGHT: &str = "HIKAYYARA CREATIVE © 2026  RAY DHARMA";
