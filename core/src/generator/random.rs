use super::*;

/// Uniformly random layouts from a fixed seed, keeping one cell (usually the first click) free of mines.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
    avoid: Coord2,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64, avoid: Coord2) -> Self {
        Self { seed, avoid }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        use rand::prelude::*;

        let mut layout = MineLayout::from_config(&config)?;
        let mut rng = SmallRng::seed_from_u64(self.seed);
        layout.populate(self.avoid, &mut rng)?;
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_gives_same_layout() {
        let config = GameConfig::expert();

        let first = RandomLayoutGenerator::new(1234, (3, 3)).generate(config).unwrap();
        let second = RandomLayoutGenerator::new(1234, (3, 3)).generate(config).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.mine_count(), 99);
        assert_eq!(first.has_mine((3, 3)), Ok(false));
    }

    #[test]
    fn generated_layout_matches_config() {
        let config = GameConfig::new((7, 11), 20);

        let layout = RandomLayoutGenerator::new(9, (6, 10)).generate(config).unwrap();

        assert_eq!(layout.game_config(), config);
        assert_eq!(layout.mine_mask().iter().filter(|&&mine| mine).count(), 20);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = GameConfig::new_unchecked((3, 3), 5);

        assert_eq!(
            RandomLayoutGenerator::new(0, (0, 0)).generate(config),
            Err(GameError::TooManyMines)
        );
        assert_eq!(
            RandomLayoutGenerator::new(0, (9, 9)).generate(GameConfig::beginner()),
            Err(GameError::InvalidCoords)
        );
    }
}
