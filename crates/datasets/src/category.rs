use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DatasetError;

/// The sixteen object categories of the ShapeNet part-segmentation benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Airplane,
    Bag,
    Cap,
    Car,
    Chair,
    Earphone,
    Guitar,
    Knife,
    Lamp,
    Laptop,
    Motorbike,
    Mug,
    Pistol,
    Rocket,
    Skateboard,
    Table,
}

impl Category {
    pub const ALL: [Category; 16] = [
        Category::Airplane,
        Category::Bag,
        Category::Cap,
        Category::Car,
        Category::Chair,
        Category::Earphone,
        Category::Guitar,
        Category::Knife,
        Category::Lamp,
        Category::Laptop,
        Category::Motorbike,
        Category::Mug,
        Category::Pistol,
        Category::Rocket,
        Category::Skateboard,
        Category::Table,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Airplane => "Airplane",
            Category::Bag => "Bag",
            Category::Cap => "Cap",
            Category::Car => "Car",
            Category::Chair => "Chair",
            Category::Earphone => "Earphone",
            Category::Guitar => "Guitar",
            Category::Knife => "Knife",
            Category::Lamp => "Lamp",
            Category::Laptop => "Laptop",
            Category::Motorbike => "Motorbike",
            Category::Mug => "Mug",
            Category::Pistol => "Pistol",
            Category::Rocket => "Rocket",
            Category::Skateboard => "Skateboard",
            Category::Table => "Table",
        }
    }

    /// WordNet synset id, which is also the category's directory name.
    pub fn synset(self) -> &'static str {
        match self {
            Category::Airplane => "02691156",
            Category::Bag => "02773838",
            Category::Cap => "02954340",
            Category::Car => "02958343",
            Category::Chair => "03001627",
            Category::Earphone => "03261776",
            Category::Guitar => "03467517",
            Category::Knife => "03624134",
            Category::Lamp => "03636649",
            Category::Laptop => "03642806",
            Category::Motorbike => "03790512",
            Category::Mug => "03797390",
            Category::Pistol => "03948459",
            Category::Rocket => "04099429",
            Category::Skateboard => "04225987",
            Category::Table => "04379243",
        }
    }

    /// Global part labels that belong to this category.
    pub fn part_labels(self) -> RangeInclusive<u8> {
        match self {
            Category::Airplane => 0..=3,
            Category::Bag => 4..=5,
            Category::Cap => 6..=7,
            Category::Car => 8..=11,
            Category::Chair => 12..=15,
            Category::Earphone => 16..=18,
            Category::Guitar => 19..=21,
            Category::Knife => 22..=23,
            Category::Lamp => 24..=27,
            Category::Laptop => 28..=29,
            Category::Motorbike => 30..=35,
            Category::Mug => 36..=37,
            Category::Pistol => 38..=40,
            Category::Rocket => 41..=43,
            Category::Skateboard => 44..=46,
            Category::Table => 47..=49,
        }
    }

    /// Position in [`Category::ALL`], used as the per-shape class label.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_synset(synset: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.synset() == synset)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts a category name (any case) or a synset id.
impl FromStr for Category {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s) || c.synset() == s)
            .ok_or_else(|| DatasetError::UnknownCategory(s.to_string()))
    }
}
