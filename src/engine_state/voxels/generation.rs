//! # World Generation
//!
//! Builds the initial [`World`] from a seed in three ordered passes over the
//! same mapping:
//!
//! 1. **Terrain**: a Perlin height field fills each column with stone/coal,
//!    one dirt layer and a grass top. Low plains columns get a water marker.
//! 2. **Caves**: 3D Perlin noise above a threshold deletes cells.
//! 3. **Trees**: forest and plains columns randomly grow a dirt trunk with
//!    grass foliage, rooted on whatever the column top is after carving.
//!
//! Noise fields are seeded from the world seed (`seed`, `seed + 1`, `seed + 2`)
//! and all random draws come from one `fastrand::Rng` seeded with it, so the
//! output is a pure function of the seed and the config.

use cgmath::Point3;
use noise::{NoiseFn, Perlin};

use super::{block::block_type::BlockType, world::World};
use crate::application_state::config::GenerationConfig;

/// Coarse terrain classification. Only gates trees and water.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Biome {
    MOUNTAIN,
    FOREST,
    PLAINS,
}

/// Counters collected while generating, for logging and tests.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Columns that received at least one terrain block.
    pub filled_columns: usize,
    pub water_pools: usize,
    pub carved_cells: usize,
    pub trees: usize,
    /// Trees skipped because their column had been emptied.
    pub skipped_trees: usize,
}

/// Deterministic world generator.
pub struct WorldGenerator {
    config: GenerationConfig,
    seed: u32,
    height_noise: Perlin,
    biome_noise: Perlin,
    water_noise: Perlin,
    cave_noise: Perlin,
}

/// Generates a world from `seed` with the default generation settings.
pub fn generate(seed: u32) -> World {
    WorldGenerator::new(GenerationConfig::default(), seed).generate()
}

impl WorldGenerator {
    /// Creates a generator for the given settings and seed.
    pub fn new(config: GenerationConfig, seed: u32) -> Self {
        WorldGenerator {
            config,
            seed,
            // Height and biome share the base seed but sample at different frequencies.
            height_noise: Perlin::new(seed),
            biome_noise: Perlin::new(seed),
            water_noise: Perlin::new(seed.wrapping_add(1)),
            cave_noise: Perlin::new(seed.wrapping_add(2)),
        }
    }

    /// Runs all three passes and returns the finished world.
    pub fn generate(&self) -> World {
        self.generate_with_stats().0
    }

    /// Runs all three passes, returning the world and pass counters.
    pub fn generate_with_stats(&self) -> (World, GenerationStats) {
        let mut world = World::new();
        let mut stats = GenerationStats::default();
        let mut rng = fastrand::Rng::with_seed(self.seed as u64);

        self.terrain_pass(&mut world, &mut rng, &mut stats);
        log::debug!(
            "Terrain pass: {} blocks in {} columns, {} water pools",
            world.len(),
            stats.filled_columns,
            stats.water_pools
        );

        self.cave_pass(&mut world, &mut stats);
        log::debug!("Cave pass: carved {} cells", stats.carved_cells);

        self.tree_pass(&mut world, &mut rng, &mut stats);
        log::debug!(
            "Tree pass: {} trees, {} skipped on empty columns",
            stats.trees,
            stats.skipped_trees
        );

        log::info!(
            "Generated world with seed {}: {} blocks",
            self.seed,
            world.len()
        );
        (world, stats)
    }

    /// Classifies the column at (`x`, `z`).
    pub fn biome_at(&self, x: i32, z: i32) -> Biome {
        let value = self
            .biome_noise
            .get(to_noise_pos_2d(x, z, self.config.biome_frequency));
        if value > self.config.mountain_threshold {
            Biome::MOUNTAIN
        } else if value > self.config.forest_threshold {
            Biome::FOREST
        } else {
            Biome::PLAINS
        }
    }

    /// Terrain height of the column at (`x`, `z`), clamped to at most
    /// `max_height`. May be negative, meaning an empty column.
    pub fn height_at(&self, x: i32, z: i32) -> i32 {
        let half = self.config.max_height as f64 / 2.0;
        let value = self
            .height_noise
            .get(to_noise_pos_2d(x, z, self.config.height_frequency));
        ((value * half + half) as i32).min(self.config.max_height)
    }

    fn terrain_pass(
        &self,
        world: &mut World,
        rng: &mut fastrand::Rng,
        stats: &mut GenerationStats,
    ) {
        let size = self.config.terrain_size;
        for x in 0..size {
            for z in 0..size {
                let height = self.height_at(x, z);
                if height < 0 {
                    continue;
                }
                fill_column(world, x, z, height, self.config.coal_chance, rng);
                stats.filled_columns += 1;

                if self.biome_at(x, z) == Biome::PLAINS
                    && height < self.config.water_max_height
                    && self
                        .water_noise
                        .get(to_noise_pos_2d(x, z, self.config.water_frequency))
                        < self.config.water_threshold
                {
                    world.set(Point3::new(x, height + 1, z), BlockType::WATER);
                    stats.water_pools += 1;
                }
            }
        }
    }

    fn cave_pass(&self, world: &mut World, stats: &mut GenerationStats) {
        let size = self.config.terrain_size;
        let frequency = self.config.cave_frequency;
        for x in 0..size {
            for z in 0..size {
                for y in 0..self.config.max_height {
                    let sample = self.cave_noise.get([
                        x as f64 * frequency,
                        y as f64 * frequency,
                        z as f64 * frequency,
                    ]);
                    if sample > self.config.cave_threshold
                        && world.remove(Point3::new(x, y, z)).is_some()
                    {
                        stats.carved_cells += 1;
                    }
                }
            }
        }
    }

    fn tree_pass(
        &self,
        world: &mut World,
        rng: &mut fastrand::Rng,
        stats: &mut GenerationStats,
    ) {
        let size = self.config.terrain_size;
        for x in 1..size - 1 {
            for z in 1..size - 1 {
                let chance = match self.biome_at(x, z) {
                    Biome::FOREST => self.config.forest_tree_chance,
                    Biome::PLAINS => self.config.plains_tree_chance,
                    Biome::MOUNTAIN => continue,
                };
                if rng.f64() >= chance {
                    continue;
                }

                let Some(top) = world.column_top(x, z) else {
                    log::trace!("No surface for tree at ({x}, {z}), skipping");
                    stats.skipped_trees += 1;
                    continue;
                };
                self.grow_tree(world, x, top + 1, z, rng);
                stats.trees += 1;
            }
        }
    }

    /// Places a trunk starting at `surface_y` and two foliage layers on top.
    fn grow_tree(
        &self,
        world: &mut World,
        x: i32,
        surface_y: i32,
        z: i32,
        rng: &mut fastrand::Rng,
    ) {
        let trunk_height =
            rng.u32(self.config.trunk_min_height..=self.config.trunk_max_height) as i32;
        for y in surface_y..surface_y + trunk_height {
            world.set(Point3::new(x, y, z), BlockType::DIRT);
        }

        let foliage_y = surface_y + trunk_height - 1;
        for (dy, offset) in [(0, 1), (1, 0)] {
            for dx in -offset..=offset {
                for dz in -offset..=offset {
                    if rng.f64() < self.config.foliage_chance {
                        world.set(Point3::new(x + dx, foliage_y + dy, z + dz), BlockType::GRASS);
                    }
                }
            }
        }
    }
}

/// Fills the column at (`x`, `z`) from `y = 0` up to `height` inclusive:
/// grass on top, one dirt layer below it, stone (or coal with probability
/// `coal_chance`) underneath.
pub fn fill_column(
    world: &mut World,
    x: i32,
    z: i32,
    height: i32,
    coal_chance: f64,
    rng: &mut fastrand::Rng,
) {
    for y in 0..=height {
        let block_type = if y == height {
            BlockType::GRASS
        } else if y < height - 1 {
            if rng.f64() < coal_chance {
                BlockType::COAL
            } else {
                BlockType::STONE
            }
        } else {
            BlockType::DIRT
        };
        world.set(Point3::new(x, y, z), block_type);
    }
}

/// Converts column coordinates to a noise sample position.
fn to_noise_pos_2d(x: i32, z: i32, frequency: f64) -> [f64; 2] {
    [x as f64 * frequency, z as f64 * frequency]
}
