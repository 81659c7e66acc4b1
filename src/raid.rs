/// Raid reference tables: how many explosives each structure takes, and what
/// those explosives cost to craft.
///
/// The numbers are approximate community figures and are fixed at compile time.
use std::fmt;
use std::ops::RangeInclusive;

pub const COUNT_RANGE: RangeInclusive<u32> = 1..=999;

const RULE: &str = "--------------------------------------------------";

/// Structure to break
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Structure {
    #[default]
    WoodWall,
    StoneWall,
    MetalWall,
    ArmoredWall,
    SheetDoor,
    GarageDoor,
    ArmoredDoor,
}

/// Explosive used to break it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Rockets,
    C4,
    Satchels,
    ExplosiveAmmo,
}

/// Crafting cost of one unit of a method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitCost {
    pub sulfur: u64,
    pub gunpowder: u64,
}

/// Units needed per structure, indexed by `Structure` then `Method`
const PIECES_NEEDED: [[u32; 4]; 7] = [
    // Rockets, C4, Satchels, Explosive Ammo
    [2, 1, 4, 49],     // Wood Wall
    [4, 2, 10, 185],   // Stone Wall
    [8, 4, 23, 400],   // Metal Wall
    [15, 8, 46, 799],  // Armored Wall
    [2, 1, 4, 63],     // Sheet Door
    [3, 2, 9, 150],    // Garage Door
    [5, 3, 15, 280],   // Armored Door
];

impl Structure {
    pub const ALL: [Structure; 7] = [
        Structure::WoodWall,
        Structure::StoneWall,
        Structure::MetalWall,
        Structure::ArmoredWall,
        Structure::SheetDoor,
        Structure::GarageDoor,
        Structure::ArmoredDoor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Structure::WoodWall => "Wood Wall",
            Structure::StoneWall => "Stone Wall",
            Structure::MetalWall => "Metal Wall",
            Structure::ArmoredWall => "Armored Wall",
            Structure::SheetDoor => "Sheet Door",
            Structure::GarageDoor => "Garage Door",
            Structure::ArmoredDoor => "Armored Door",
        }
    }

    /// Units of `method` needed to break one of this structure
    pub fn pieces_needed(self, method: Method) -> u32 {
        PIECES_NEEDED[self as usize][method as usize]
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Method {
    pub const ALL: [Method; 4] = [Method::Rockets, Method::C4, Method::Satchels, Method::ExplosiveAmmo];

    pub fn name(self) -> &'static str {
        match self {
            Method::Rockets => "Rockets",
            Method::C4 => "C4",
            Method::Satchels => "Satchels",
            Method::ExplosiveAmmo => "Explosive Ammo",
        }
    }

    pub fn unit_cost(self) -> UnitCost {
        let (sulfur, gunpowder) = match self {
            Method::Rockets => (1400, 650),
            Method::C4 => (2200, 1000),
            Method::Satchels => (480, 240),
            Method::ExplosiveAmmo => (25, 10),
        };
        UnitCost { sulfur, gunpowder }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-method unit counts for one structure
pub fn planner_rows(structure: Structure) -> Vec<(Method, u32)> {
    Method::ALL
        .into_iter()
        .map(|method| (method, structure.pieces_needed(method)))
        .collect()
}

pub fn planner_report(structure: Structure) -> String {
    let mut out = format!("{}\n{}\n", structure, RULE);
    for (method, pieces) in planner_rows(structure) {
        out.push_str(&format!("{:<16} : {}\n", method.name(), pieces));
    }
    out
}

/// Material estimate for breaking `count` of a structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaidEstimate {
    pub structure: Structure,
    pub method: Method,
    pub count: u32,
    pub total_needed: u64,
    pub sulfur_direct: u64,
    pub gunpowder: u64,
    pub charcoal: u64,
    pub sulfur_for_gunpowder: u64,
    pub sulfur_total: u64,
}

/// Estimate materials; `count` is clamped to `COUNT_RANGE`
pub fn estimate(structure: Structure, method: Method, count: u32) -> RaidEstimate {
    let count = count.clamp(*COUNT_RANGE.start(), *COUNT_RANGE.end());
    let total_needed = u64::from(structure.pieces_needed(method)) * u64::from(count);

    let cost = method.unit_cost();
    let sulfur_direct = cost.sulfur * total_needed;
    let gunpowder = cost.gunpowder * total_needed;
    // Each gunpowder takes two sulfur and one charcoal
    let sulfur_for_gunpowder = gunpowder * 2;

    RaidEstimate {
        structure,
        method,
        count,
        total_needed,
        sulfur_direct,
        gunpowder,
        charcoal: gunpowder,
        sulfur_for_gunpowder,
        sulfur_total: sulfur_direct + sulfur_for_gunpowder,
    }
}

impl RaidEstimate {
    pub fn report(&self) -> String {
        format!(
            "Target: {} x{}\n\
             Method: {}\n\
             Total Needed: {}\n\
             {}\n\
             Est. Materials:\n\
             \x20 Sulfur (direct): {}\n\
             \x20 Gunpowder:       {}\n\
             \x20 Charcoal:        {}\n\
             \x20 Sulfur (for GP): {}\n\
             \x20 Sulfur total:    {}\n",
            self.structure,
            self.count,
            self.method,
            self.total_needed,
            RULE,
            format_thousands(self.sulfur_direct),
            format_thousands(self.gunpowder),
            format_thousands(self.charcoal),
            format_thousands(self.sulfur_for_gunpowder),
            format_thousands(self.sulfur_total),
        )
    }
}

/// Parse the count field; anything unparsable counts as one
pub fn parse_count(input: &str) -> u32 {
    input
        .trim()
        .parse::<u32>()
        .unwrap_or(*COUNT_RANGE.start())
        .clamp(*COUNT_RANGE.start(), *COUNT_RANGE.end())
}

/// `1234567` -> `"1,234,567"`
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
