//! Weapon/upgrade catalogs and level-end offer generation
//!
//! Offers are drawn from a weighted pool: each catalog entry appears once per
//! point of rarity weight, the pool is shuffled, and entries are taken in
//! shuffled order.

use rand::Rng;
use rand::seq::SliceRandom;

use super::player::Weapon;

/// Number of weapon cards offered per level clear
pub const WEAPON_OFFERS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Legendary => "Legendary",
        }
    }
}

/// Pool copies per rarity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RarityWeights {
    pub common: u32,
    pub uncommon: u32,
    pub rare: u32,
    pub legendary: u32,
}

impl RarityWeights {
    pub fn weight(&self, rarity: Rarity) -> u32 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
            Rarity::Legendary => self.legendary,
        }
    }
}

/// Legendary weapons land roughly once in 36 draws
pub const WEAPON_WEIGHTS: RarityWeights = RarityWeights {
    common: 20,
    uncommon: 10,
    rare: 5,
    legendary: 1,
};

pub const UPGRADE_WEIGHTS: RarityWeights = RarityWeights {
    common: 10,
    uncommon: 5,
    rare: 2,
    legendary: 1,
};

/// Anything with a rarity can go in a weighted pool
pub trait Weighted {
    fn rarity(&self) -> Rarity;
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeaponDef {
    pub name: &'static str,
    pub description: &'static [&'static str],
    pub rarity: Rarity,
    pub weapon: Weapon,
}

impl Weighted for WeaponDef {
    fn rarity(&self) -> Rarity {
        self.rarity
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpgradeEffect {
    /// Additive damage bonus for the current weapon (0.05 = +5%)
    DamageIncrease(f32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeDef {
    pub name: &'static str,
    pub description: &'static [&'static str],
    pub rarity: Rarity,
    pub effect: UpgradeEffect,
}

impl Weighted for UpgradeDef {
    fn rarity(&self) -> Rarity {
        self.rarity
    }
}

pub static WEAPONS: [WeaponDef; 4] = [
    WeaponDef {
        name: "Pistol",
        description: &["Basic Fire", "Standard Damage"],
        rarity: Rarity::Common,
        weapon: Weapon::Pistol,
    },
    WeaponDef {
        name: "SMG",
        description: &["Automatic Fire", "Fast Rate of Fire", "Low Damage"],
        rarity: Rarity::Uncommon,
        weapon: Weapon::Smg,
    },
    WeaponDef {
        name: "Shotgun",
        description: &["Manual Fire", "Multiple Projectiles", "High Damage"],
        rarity: Rarity::Uncommon,
        weapon: Weapon::Shotgun,
    },
    WeaponDef {
        name: "Turret Cannon",
        description: &["Deploys Auto-Turret", "Targets Enemies", "Infinite Duration"],
        rarity: Rarity::Legendary,
        weapon: Weapon::Turret,
    },
];

pub static UPGRADES: [UpgradeDef; 3] = [
    UpgradeDef {
        name: "+5% Damage",
        description: &["Increases current", "weapon damage by 5%."],
        rarity: Rarity::Common,
        effect: UpgradeEffect::DamageIncrease(0.05),
    },
    UpgradeDef {
        name: "+10% Damage",
        description: &["Increases current", "weapon damage by 10%."],
        rarity: Rarity::Uncommon,
        effect: UpgradeEffect::DamageIncrease(0.10),
    },
    UpgradeDef {
        name: "+20% Damage",
        description: &["Increases current", "weapon damage by 20%."],
        rarity: Rarity::Rare,
        effect: UpgradeEffect::DamageIncrease(0.20),
    },
];

/// One level-end choice
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Offer {
    Weapon(&'static WeaponDef),
    Upgrade(&'static UpgradeDef),
}

impl Offer {
    pub fn name(&self) -> &'static str {
        match self {
            Offer::Weapon(def) => def.name,
            Offer::Upgrade(def) => def.name,
        }
    }

    pub fn description(&self) -> &'static [&'static str] {
        match self {
            Offer::Weapon(def) => def.description,
            Offer::Upgrade(def) => def.description,
        }
    }

    pub fn rarity(&self) -> Rarity {
        match self {
            Offer::Weapon(def) => def.rarity,
            Offer::Upgrade(def) => def.rarity,
        }
    }

    pub fn is_upgrade(&self) -> bool {
        matches!(self, Offer::Upgrade(_))
    }
}

/// Each item repeated `weight(rarity)` times
pub fn weighted_pool<'a, T: Weighted>(
    items: impl IntoIterator<Item = &'a T>,
    weights: &RarityWeights,
) -> Vec<&'a T> {
    let mut pool = Vec::new();
    for item in items {
        for _ in 0..weights.weight(item.rarity()) {
            pool.push(item);
        }
    }
    pool
}

/// First entry of a shuffled weighted pool
pub fn draw_weighted<'a, T: Weighted, R: Rng>(
    rng: &mut R,
    items: &'a [T],
    weights: &RarityWeights,
) -> Option<&'a T> {
    let mut pool = weighted_pool(items, weights);
    pool.shuffle(rng);
    pool.first().copied()
}

/// Up to `count` distinct weapons other than `current`
pub fn pick_weapons<'a, R: Rng>(
    rng: &mut R,
    catalog: &'a [WeaponDef],
    current: Weapon,
    count: usize,
    weights: &RarityWeights,
) -> Vec<&'a WeaponDef> {
    let candidates = catalog.iter().filter(|def| def.weapon != current);
    let mut pool = weighted_pool(candidates, weights);
    pool.shuffle(rng);

    let mut picked: Vec<&WeaponDef> = Vec::with_capacity(count);
    for def in pool {
        if picked.len() == count {
            break;
        }
        if !picked.iter().any(|p| p.weapon == def.weapon) {
            picked.push(def);
        }
    }

    // Zero-weight tiers never reach the pool; top up from whatever is left
    while picked.len() < count {
        let remaining: Vec<&WeaponDef> = catalog
            .iter()
            .filter(|def| def.weapon != current && !picked.iter().any(|p| p.weapon == def.weapon))
            .collect();
        if remaining.is_empty() {
            break;
        }
        picked.push(remaining[rng.random_range(0..remaining.len())]);
    }

    picked
}

/// Two weapons plus one upgrade, in random order
pub fn generate_offers<R: Rng>(rng: &mut R, current: Weapon) -> Vec<Offer> {
    let mut offers: Vec<Offer> = pick_weapons(rng, &WEAPONS, current, WEAPON_OFFERS, &WEAPON_WEIGHTS)
        .into_iter()
        .map(Offer::Weapon)
        .collect();

    if let Some(upgrade) = draw_weighted(rng, &UPGRADES, &UPGRADE_WEIGHTS) {
        offers.push(Offer::Upgrade(upgrade));
    }

    offers.shuffle(rng);
    offers
}
