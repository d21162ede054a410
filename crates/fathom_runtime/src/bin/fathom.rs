//! A minimal playable world, so the binary runs out of the box.

use fathom_engine::Game;
use fathom_foundation::{Id, Value};
use fathom_runtime::Repl;
use fathom_world::{Direction, LocTag};

fn obj(s: &str) -> Value {
    Value::Id(Id::from(s))
}

fn build_demo() -> fathom_foundation::Result<Game> {
    let mut game = Game::new();
    let w = &mut game.world;

    w.create("lobby", "room")?;
    w.set("description", &[obj("lobby")], "A dusty lobby. A hall lies north.");
    w.set("makes_light", &[obj("lobby")], true);

    w.create("hall", "room")?;
    w.set("description", &[obj("hall")], "A long hall, echoing.");
    w.set("makes_light", &[obj("hall")], true);

    w.create("plain-door", "door")?;
    w.set("openable", &[obj("plain-door")], true);
    w.place_door(
        &Id::from("plain-door"),
        &Id::from("lobby"),
        Direction::North,
        &Id::from("hall"),
    )?;

    w.create("player", "person")?;
    w.set_player(&Id::from("player"));
    w.relate(&Id::from("player"), &Id::from("lobby"), LocTag::ContainedBy)?;

    w.create("red-ball", "thing")?;
    w.set("description", &[obj("red-ball")], "A small rubber ball, quite red.");
    w.relate(&Id::from("red-ball"), &Id::from("lobby"), LocTag::ContainedBy)?;

    w.create("cardboard-box", "container")?;
    w.set("openable", &[obj("cardboard-box")], true);
    w.relate(
        &Id::from("cardboard-box"),
        &Id::from("lobby"),
        LocTag::ContainedBy,
    )?;

    Ok(game)
}

fn main() {
    let game = match build_demo() {
        Ok(game) => game,
        Err(e) => {
            eprintln!("world build failed: {e}");
            std::process::exit(1);
        }
    };
    let mut repl = match Repl::new(game) {
        Ok(repl) => repl,
        Err(e) => {
            eprintln!("terminal init failed: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = repl.run() {
        eprintln!("fatal: {e}");
        std::process::exit(1);
    }
}
