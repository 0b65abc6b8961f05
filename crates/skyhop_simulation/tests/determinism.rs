//! Тесты детерминизма
//!
//! Demo уровень + seeded bot: одинаковый seed → идентичный snapshot

use skyhop_simulation::{
    create_headless_app, gameplay_snapshot, setup_demo_level, HeadlessPhysicsPlugin,
    SkyhopPlugin,
};
use bevy::prelude::*;

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    const TICK_COUNT: usize = 600;

    // Первый прогон
    let snapshot1 = run_simulation(SEED, TICK_COUNT);

    // Второй прогон с тем же seed
    let snapshot2 = run_simulation(SEED, TICK_COUNT);

    // Снепшоты должны быть идентичны
    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;
    const TICK_COUNT: usize = 900;

    // Запускаем 3 раза: все должны быть идентичны
    let snapshots: Vec<_> = (0..3).map(|_| run_simulation(SEED, TICK_COUNT)).collect();

    // Все снепшоты должны совпадать с первым
    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

#[test]
fn test_different_seeds_diverge() {
    const TICK_COUNT: usize = 600;

    let snapshot1 = run_simulation(1, TICK_COUNT);
    let snapshot2 = run_simulation(2, TICK_COUNT);

    // Bot ходит по-разному → позиции отличаются
    assert_ne!(snapshot1, snapshot2);
}

/// Запускает demo уровень с bot'ом и возвращает snapshot мира
fn run_simulation(seed: u64, tick_count: usize) -> Vec<u8> {
    let mut app = create_headless_app(seed);
    app.add_plugins(SkyhopPlugin::default())
        .add_plugins(HeadlessPhysicsPlugin)
        .add_systems(Startup, setup_demo_level);

    // Прогоняем симуляцию
    for _ in 0..tick_count {
        app.update();
    }

    gameplay_snapshot(app.world_mut())
}
