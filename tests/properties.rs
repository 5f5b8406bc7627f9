use lattice_automata::domain::seeding::{self, BrainDensities};
use lattice_automata::{
    Algorithm, BriansBrainRule, Cell, ConwayRule, FiringRule, Grid, LatticeConfig, LatticeError,
    LogisticRule, Neuron, RunConfig, Stencil, execute, neighbors, presets, solve,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn config_for(stencil: Stencil, size: usize) -> LatticeConfig {
    LatticeConfig::new(size, stencil.topology(), stencil.neighborhood(), stencil.totalistic()).unwrap()
}

fn toroidal_stencils() -> Vec<Stencil> {
    Stencil::all()
        .into_iter()
        .filter(|s| s.topology() == lattice_automata::Topology::Toroidal)
        .collect()
}

#[test]
fn block_is_a_still_life() {
    for size in [5, 6, 9] {
        let mut grid = Grid::filled(size, Cell::Dead);
        presets::block().place_on(&mut grid, 1, 1);
        let snapshots = solve(
            LatticeConfig::game_of_life(size).unwrap(),
            ConwayRule,
            grid.clone(),
            12,
            Algorithm::Serial,
        )
        .unwrap();
        assert!(snapshots.iter().all(|s| *s == grid), "block changed on L={size}");
    }
}

#[test]
fn glider_translates_every_four_steps() {
    let size = 10;
    let mut grid = Grid::filled(size, Cell::Dead);
    presets::glider().place_on(&mut grid, 0, 0);

    let snapshots = solve(
        LatticeConfig::game_of_life(size).unwrap(),
        ConwayRule,
        grid.clone(),
        40,
        Algorithm::Parallel,
    )
    .unwrap();

    for k in 0..=10 {
        let expected = grid.shifted(k as isize, k as isize);
        assert_eq!(snapshots[4 * k], expected, "glider after {} steps", 4 * k);
    }
    // in between it is a different phase of the glider
    assert_ne!(snapshots[2], grid);
    assert_eq!(snapshots[2].count(Cell::is_alive), 5);
}

#[test]
fn logistic_fixed_point_on_every_lattice() {
    let x = 2.0 / 3.0;
    let rule = LogisticRule::new(3.0).unwrap();
    for stencil in Stencil::all() {
        let config = config_for(stencil, 7);
        let snapshots = solve(config, rule, Grid::filled(7, x), 25, Algorithm::Serial).unwrap();
        for (step, grid) in snapshots.iter().enumerate() {
            assert!(
                grid.cells().iter().all(|v| (v - x).abs() < 1e-12),
                "{stencil} drifted at step {step}"
            );
        }
    }
}

#[test]
fn spherical_pole_neighbor_counts() {
    let size = 10;
    let config = LatticeConfig::from_tags(size, "spherical", "Moore", "outer").unwrap();
    let grid = Grid::filled(size, 0u8);
    for col in 0..size {
        assert_eq!(neighbors(&config, &grid, 0, col).unwrap().len(), 12);
        assert_eq!(neighbors(&config, &grid, 9, col).unwrap().len(), 12);
        for row in 1..9 {
            assert_eq!(neighbors(&config, &grid, row, col).unwrap().len(), 8);
        }
    }
}

#[test]
fn rejected_configurations_run_no_steps() {
    assert!(matches!(
        LatticeConfig::game_of_life(0),
        Err(LatticeError::InvalidDimension(_))
    ));
    assert!(matches!(
        LatticeConfig::from_tags(10, "hyperbolic", "Moore", "outer"),
        Err(LatticeError::InvalidConfiguration(_))
    ));

    let run = RunConfig::from_toml(
        "automaton = \"brians-brain\"\n[lattice]\nsize = 10\ntopology = \"hyperbolic\"",
    )
    .unwrap();
    assert!(matches!(execute(&run), Err(LatticeError::InvalidConfiguration(_))));
}

fn brain_run(seed: u64, size: usize, stencil: Stencil, rule: BriansBrainRule, duration: u64) -> Vec<Grid<Neuron>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let initial = seeding::random_brain(size, BrainDensities::default(), &mut rng).unwrap();
    solve(config_for(stencil, size), rule, initial, duration, Algorithm::Parallel).unwrap()
}

fn any_stencil() -> impl Strategy<Value = Stencil> {
    prop::sample::select(Stencil::all().to_vec())
}

fn any_firing_rule() -> impl Strategy<Value = FiringRule> {
    prop::sample::select(vec![
        FiringRule::Equal,
        FiringRule::GreaterOrEqual,
        FiringRule::LessOrEqual,
        FiringRule::Greater,
        FiringRule::Less,
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn firing_cells_turn_refractory(
        seed in any::<u64>(),
        stencil in any_stencil(),
        lambda in 0u32..6,
        firing_rule in any_firing_rule(),
        t_refrac in 0u32..4,
    ) {
        let rule = BriansBrainRule::new(lambda, firing_rule, t_refrac);
        let snapshots = brain_run(seed, 8, stencil, rule, 10);
        for pair in snapshots.windows(2) {
            for (row, col, state) in pair[0].iter_cells() {
                if state == Neuron::Firing {
                    prop_assert_eq!(pair[1].get(row, col), Some(Neuron::Refractory));
                }
            }
        }
    }

    #[test]
    fn refractory_lasts_exactly_the_period(
        seed in any::<u64>(),
        stencil in any_stencil(),
        k in 1u32..5,
    ) {
        let rule = BriansBrainRule::new(2, FiringRule::Equal, k);
        let snapshots = brain_run(seed, 8, stencil, rule, 16);
        let k = k as usize;
        for t in 0..snapshots.len() - k {
            for (row, col, state) in snapshots[t].iter_cells() {
                let entered = state == Neuron::Refractory
                    && (t == 0 || snapshots[t - 1].get(row, col) != Some(Neuron::Refractory));
                if !entered {
                    continue;
                }
                for later in &snapshots[t..t + k] {
                    prop_assert_eq!(later.get(row, col), Some(Neuron::Refractory));
                }
                prop_assert_eq!(snapshots[t + k].get(row, col), Some(Neuron::Quiescent));
            }
        }
    }

    #[test]
    fn toroidal_steps_commute_with_shifts(
        seed in any::<u64>(),
        dr in -7isize..7,
        dc in -7isize..7,
        stencil_idx in 0usize..4,
    ) {
        let size = 7;
        let stencil = toroidal_stencils()[stencil_idx];
        let config = config_for(stencil, size);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let life = seeding::random_life(size, 0.4, &mut rng).unwrap();
        let game = LatticeConfig::game_of_life(size).unwrap();
        let stepped = solve(game, ConwayRule, life.clone(), 1, Algorithm::Serial).unwrap();
        let shifted = solve(game, ConwayRule, life.shifted(dr, dc), 1, Algorithm::Serial).unwrap();
        prop_assert_eq!(&shifted[1], &stepped[1].shifted(dr, dc));

        let brain = seeding::random_brain(size, BrainDensities::default(), &mut rng).unwrap();
        let rule = BriansBrainRule::default();
        let stepped = solve(config, rule, brain.clone(), 1, Algorithm::Serial).unwrap();
        let shifted = solve(config, rule, brain.shifted(dr, dc), 1, Algorithm::Serial).unwrap();
        prop_assert_eq!(&shifted[1], &stepped[1].shifted(dr, dc));

        let values = seeding::uniform(size, &mut rng).unwrap();
        let rule = LogisticRule::new(3.6).unwrap();
        let stepped = solve(config, rule, values.clone(), 1, Algorithm::Serial).unwrap();
        let shifted = solve(config, rule, values.shifted(dr, dc), 1, Algorithm::Serial).unwrap();
        prop_assert_eq!(&shifted[1], &stepped[1].shifted(dr, dc));
    }
}
