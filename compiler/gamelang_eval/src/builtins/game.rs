//! The `game` module: toy functions that log an action and return a
//! simulated result. Brought in with `import game`.

use crate::errors::EvalResult;
use crate::registry::{BuiltinDoc, CallContext, FunctionEntry, Module};
use crate::value::{Value, ValueMap};

use super::arg;

const DEFAULT_HP: f64 = 100.0;

pub(crate) fn module() -> Module {
    Module::new(
        "game",
        vec![
            FunctionEntry::new("spawn_player", spawn_player)
                .alias("创建玩家")
                .documented(BuiltinDoc {
                    summary: "Create a player object with full health",
                    syntax: "spawn_player(name)",
                    example: "hero = spawn_player(\"Ada\")",
                    keywords: &["玩家", "游戏"],
                }),
            FunctionEntry::new("roll_dice", roll_dice)
                .alias("掷骰子")
                .documented(BuiltinDoc {
                    summary: "Roll a die with the given number of sides (default 6)",
                    syntax: "roll_dice(sides?)",
                    example: "roll = roll_dice(20)",
                    keywords: &["骰子", "随机", "游戏"],
                }),
            FunctionEntry::new("attack", attack).alias("攻击"),
            FunctionEntry::new("heal", heal).alias("治疗"),
            FunctionEntry::new("save_game", save_game).alias("保存游戏"),
        ],
    )
}

fn spawn_player(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let name = match args.first() {
        Some(name) => name.to_string(),
        None => "player".to_string(),
    };
    ctx.sink.write_line(&format!("[game] {name} enters the world"));
    let mut player = ValueMap::new();
    player.insert("name".to_string(), Value::Str(name));
    player.insert("hp".to_string(), Value::Number(DEFAULT_HP));
    player.insert("level".to_string(), Value::Number(1.0));
    Ok(Value::Map(player))
}

fn roll_dice(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "clamped to at least one side"
    )]
    let sides = arg(args, 0).to_number().map_or(6, |n| n.max(1.0) as u32);
    let roll = fastrand::u32(1..=sides);
    ctx.sink
        .write_line(&format!("[game] rolled a d{sides}: {roll}"));
    Ok(Value::Number(f64::from(roll)))
}

/// Damage is the given power plus a small random bonus.
fn attack(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let target = arg(args, 0).to_string();
    let power = arg(args, 1).to_number().unwrap_or(10.0);
    let damage = power + f64::from(fastrand::u8(0..=5));
    ctx.sink
        .write_line(&format!("[game] attack on {target} deals {damage}"));
    Ok(Value::Number(damage))
}

/// Heals a player map, capping hp at the default maximum, and returns the
/// updated player. Anything else gets the amount back.
fn heal(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let amount = arg(args, 1).to_number().unwrap_or(10.0);
    match arg(args, 0) {
        Value::Map(player) => {
            let mut player = player.clone();
            let hp = player
                .get("hp")
                .and_then(Value::to_number)
                .unwrap_or(0.0);
            let healed = (hp + amount).min(DEFAULT_HP);
            player.insert("hp".to_string(), Value::Number(healed));
            ctx.sink.write_line(&format!("[game] healed to {healed}"));
            Ok(Value::Map(player))
        }
        other => {
            ctx.sink
                .write_line(&format!("[game] heal {other} by {amount}"));
            Ok(Value::Number(amount))
        }
    }
}

fn save_game(ctx: &CallContext<'_>, args: &[Value]) -> EvalResult {
    let slot = match args.first() {
        Some(slot) => slot.to_string(),
        None => "slot1".to_string(),
    };
    ctx.sink.write_line(&format!("[game] saved to {slot}"));
    Ok(Value::Bool(true))
}
