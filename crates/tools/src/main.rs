//! Map linter: parses a map file, builds its collision index, and reports a
//! tile census so authored maps can be validated without launching the game.

use anyhow::{Context, Result, bail};
use clap::Parser;
use crawl_core::{Dungeon, MapFile, TileCategory};
use serde::Serialize;
use std::fs;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the map file to check
    #[arg(short, long)]
    map: String,

    /// Emit the summary as JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct MapSummary {
    rows: usize,
    cols: usize,
    player_start: (usize, usize),
    blocks: usize,
    enemies: usize,
    potions: usize,
    ammo: usize,
    gates: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let map_text = fs::read_to_string(&args.map)
        .with_context(|| format!("Failed to read map file: {}", args.map))?;
    let map = MapFile::parse(&map_text)
        .map_err(|e| anyhow::anyhow!("Map file is invalid: {e}"))?;
    let dungeon = Dungeon::from_map(&map);

    let index = dungeon.index();
    let summary = MapSummary {
        rows: map.rows,
        cols: map.cols,
        player_start: map.player_start,
        blocks: index.count(TileCategory::Blocks),
        enemies: index.count(TileCategory::Enemies),
        potions: index.count(TileCategory::Potions),
        ammo: index.count(TileCategory::Ammo),
        gates: index.count(TileCategory::Gates),
    };

    if map.player_start.0 >= map.rows || map.player_start.1 >= map.cols {
        bail!(
            "player start {:?} is outside the {}x{} grid",
            map.player_start,
            map.rows,
            map.cols
        );
    }
    let spawn = dungeon.spawn_hitbox();
    if index.collides(spawn, TileCategory::Blocks) {
        bail!("player start {:?} overlaps a block", map.player_start);
    }
    if summary.gates == 0 {
        bail!("map has no gate, the run could never be won");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Map OK: {}x{} tiles", summary.rows, summary.cols);
        println!("Player start: {:?}", summary.player_start);
        println!("Blocks: {}", summary.blocks);
        println!("Enemies: {}", summary.enemies);
        println!("Potions: {}", summary.potions);
        println!("Ammo: {}", summary.ammo);
        println!("Gates: {}", summary.gates);
    }

    Ok(())
}
