//! Command implementations for phonicsctl

use anyhow::{bail, Context as _, Result};
use owo_colors::OwoColorize;
use phonics_common::progress::MASTERY_THRESHOLD;
use phonics_common::{Catalog, PhonicsConfig, ProgressStore, SaveStatus, Stage};
use std::path::PathBuf;

/// Catalog and store for one invocation
pub struct Context {
    catalog: Catalog,
    store: ProgressStore,
    save_path: PathBuf,
}

impl Context {
    pub fn open(config: &PhonicsConfig) -> Result<Self> {
        let catalog = config.load_catalog()?;
        let adapter = config.adapter();
        let save_path = adapter.path().to_path_buf();
        tracing::debug!("Using save file {}", save_path.display());
        let store = ProgressStore::for_catalog(&catalog, adapter);
        Ok(Self {
            catalog,
            store,
            save_path,
        })
    }

    /// Stage that exists and is playable
    fn playable(&self, id: u32) -> Result<&Stage> {
        let stage = self.catalog.get_stage(id)?;
        if !self.store.is_unlocked(id) {
            bail!("Stage {} ({}) is locked", id, stage.name);
        }
        Ok(stage)
    }
}

fn star_bar(stars: u8) -> String {
    let filled = "★".repeat(stars as usize);
    let empty = "☆".repeat(3usize.saturating_sub(stars as usize));
    format!("{}{}", filled.yellow(), empty.dimmed())
}

fn report_save(status: &SaveStatus) {
    if let Some(e) = status.error() {
        eprintln!("{} progress not saved: {}", "[!]".yellow(), e);
    }
}

pub fn stages(ctx: &Context) -> Result<()> {
    for stage in ctx.catalog.list_stages() {
        let summary = ctx.store.get_stage_summary(stage.id);
        let lock = if summary.unlocked {
            "  ".to_string()
        } else {
            "🔒".to_string()
        };
        println!(
            "{} {:>2}. {:<18} {:<20} {}",
            lock,
            stage.id,
            stage.name.bold(),
            stage.pattern,
            star_bar(summary.stars)
        );
    }
    Ok(())
}

pub fn stage(ctx: &Context, id: u32) -> Result<()> {
    let stage = ctx.catalog.get_stage(id)?;
    println!("{} - {} ({})", stage.id, stage.name.bold(), stage.pattern);
    println!("Boss: {}   Theme: {}", stage.display.boss, stage.display.theme);
    println!("{}", "-".repeat(40));
    for word in &stage.words {
        println!(
            "  {} {:<6} {:<14} dmg {}",
            word.hint,
            word.text,
            word.phonemes.join("-"),
            word.damage
        );
    }
    Ok(())
}

pub fn collection(ctx: &Context, id: u32) -> Result<()> {
    for item in ctx.catalog.get_collection_items(id)? {
        println!(
            "  [{}.{}] {:<3} {} {}",
            item.word_index, item.phoneme_index, item.phoneme, item.hint, item.word
        );
    }
    Ok(())
}

pub fn battle(ctx: &Context, id: u32) -> Result<()> {
    for word in ctx.catalog.get_battle_words(id)? {
        println!("  {:<6} dmg {}", word.text, word.damage);
    }
    Ok(())
}

pub fn progress(ctx: &Context, id: Option<u32>) -> Result<()> {
    let Some(id) = id else {
        println!("Save file:      {}", ctx.save_path.display());
        println!("Currency:       {}", ctx.store.get_currency());
        println!("Total stars:    {}", ctx.store.total_stars());
        println!("Correct blends: {}", ctx.store.total_words_mastered());
        println!("Furthest stage: {}", ctx.store.highest_unlocked_stage());
        return Ok(());
    };

    let stage = ctx.catalog.get_stage(id)?;
    let progress = ctx.store.get_stage_progress(id);
    println!("{} - {}", stage.id, stage.name.bold());
    println!("  Unlocked:   {}", progress.unlocked);
    println!("  Stars:      {}", star_bar(progress.stars));
    println!("  Best score: {}", progress.best_score);
    println!("  Attempts:   {}", progress.attempts);
    println!(
        "  Blends:     {}/{} ({:.0}%)",
        progress.correct_blend_attempts,
        progress.total_blend_attempts,
        progress.accuracy() * 100.0
    );
    println!("  Collected:  {}", progress.collected_item_count);
    println!("  Difficulty: {}", progress.difficulty_tier());
    if let Some(at) = progress.completed_at {
        println!("  Completed:  {}", at.format("%Y-%m-%d %H:%M UTC"));
    }

    let mastered: Vec<&str> = progress.mastered_words.iter().map(|w| w.as_str()).collect();
    println!("  Mastered:   {}", mastered.join(", "));
    for (word, counts) in &progress.word_attempt_counts {
        if !progress.is_mastered(word) {
            println!(
                "    {:<6} {}/{} correct, {} wrong",
                word, counts.correct, MASTERY_THRESHOLD, counts.wrong
            );
        }
    }
    Ok(())
}

pub fn blend(ctx: &mut Context, id: u32, word: &str, success: bool) -> Result<()> {
    ctx.playable(id)?;
    let outcome = ctx.store.record_blend_attempt(id, word, success);
    if outcome.newly_mastered {
        println!("{} '{}' mastered!", "✓".green(), word);
    } else {
        println!("Recorded {} blend for '{}'", if success { "correct" } else { "wrong" }, word);
    }
    report_save(&outcome.save);
    Ok(())
}

pub fn collect(ctx: &mut Context, id: u32, items: u32) -> Result<()> {
    ctx.playable(id)?;
    let status = ctx.store.record_collection_complete(id, items);
    println!(
        "Collected {} items (best {})",
        items,
        ctx.store.get_stage_progress(id).collected_item_count
    );
    report_save(&status);
    Ok(())
}

pub fn complete(ctx: &mut Context, id: u32, score: u64) -> Result<()> {
    ctx.playable(id)?;
    let completion = ctx.store.complete_stage(id, score);
    println!(
        "Stage {} complete: {}  +{} currency",
        id,
        star_bar(completion.stars),
        completion.currency_awarded
    );
    if let Some(next) = completion.unlocked_next {
        let name = ctx
            .catalog
            .get_stage(next)
            .map(|s| s.name.clone())
            .unwrap_or_default();
        println!("Stage {} ({}) is open", next, name);
    }
    report_save(&completion.save);
    Ok(())
}

pub fn unlock(ctx: &mut Context, id: u32) -> Result<()> {
    let stage = ctx.catalog.get_stage(id)?;
    let name = stage.name.clone();
    let status = ctx.store.unlock_stage(id);
    println!("Stage {} ({}) unlocked", id, name);
    report_save(&status);
    Ok(())
}

pub fn currency(ctx: &mut Context, add: Option<u64>) -> Result<()> {
    if let Some(amount) = add {
        let status = ctx.store.add_currency(amount);
        report_save(&status);
    }
    println!("{}", ctx.store.get_currency());
    Ok(())
}

pub fn difficulty(ctx: &Context, id: u32) -> Result<()> {
    ctx.catalog.get_stage(id)?;
    let tier = ctx.store.get_difficulty_tier(id);
    println!("{} ({})", tier.value(), tier);
    Ok(())
}

pub fn reset(ctx: &mut Context, yes: bool) -> Result<()> {
    if !yes {
        bail!("Refusing to erase progress without --yes");
    }
    let status = ctx.store.reset();
    println!("All progress erased");
    report_save(&status);
    Ok(())
}

pub fn export(ctx: &Context) -> Result<()> {
    let json = serde_json::to_string_pretty(ctx.store.state())
        .context("Failed to serialize progress")?;
    println!("{}", json);
    Ok(())
}
