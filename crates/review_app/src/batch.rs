//! One-shot subcommands. They drive the same `update` function as the
//! interactive session, running the IO effects inline.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};
use review_core::{update, AppState, Effect, Msg, PathResolver, Scope, Tag, Timings};
use review_engine::{
    list_input_files, ClipboardSource, DocumentExporter, DocxExporter, SystemClipboard, Tagger,
};

use crate::platform::effects::{action_error_from_export, action_error_from_tag};
use crate::platform::render;

/// Where the reply of an `export` comes from.
pub enum ReplySource<'a> {
    File(&'a Path),
    Clipboard(&'a dyn ClipboardSource),
}

/// State with `scope` selected and its catalog loaded.
fn loaded_state(resolver: &PathResolver, scope: &Scope) -> anyhow::Result<AppState> {
    let state = AppState::new(resolver.clone(), Timings::default());
    let (state, _) = apply(
        state,
        Msg::SelectionChanged {
            project: scope.project().to_string(),
            delivery: scope.delivery().to_string(),
        },
    )?;
    let input_dir = resolver.input_dir(scope);
    let catalog =
        list_input_files(&input_dir).with_context(|| format!("listing {}", input_dir.display()))?;
    let (state, _) = apply(
        state,
        Msg::CatalogLoaded {
            scope: scope.clone(),
            catalog,
        },
    )?;
    Ok(state)
}

/// Runs `update`, turning a blocking notice into an error.
fn apply(state: AppState, msg: Msg) -> anyhow::Result<(AppState, Vec<Effect>)> {
    let (state, effects) = update(state, msg);
    if let Some(alert) = state.alert() {
        bail!("{alert}");
    }
    Ok((state, effects))
}

fn with_target(state: AppState, target: Option<&str>) -> anyhow::Result<AppState> {
    match target {
        Some(name) => Ok(apply(state, Msg::ReviewTargetSelected(name.to_string()))?.0),
        None => Ok(state),
    }
}

pub fn list(resolver: &PathResolver, scope: &Scope) -> anyhow::Result<Vec<String>> {
    let state = loaded_state(resolver, scope)?;
    Ok(render::full(&state.view()))
}

pub fn tag(resolver: &PathResolver, scope: &Scope, file: &str, tag: &str) -> anyhow::Result<String> {
    let tag: Tag = tag.parse()?;
    let new_name = Tagger::default()
        .tag(&resolver.input_dir(scope), file, tag)
        .map_err(|err| anyhow!("標記失敗：{}", action_error_from_tag(err)))?;
    Ok(format!("✓ 已標記為 {tag}：{new_name}"))
}

pub fn prompt(resolver: &PathResolver, scope: &Scope, target: Option<&str>) -> anyhow::Result<String> {
    let state = with_target(loaded_state(resolver, scope)?, target)?;
    let (state, _) = apply(state, Msg::GeneratePromptClicked)?;
    Ok(state.prompt().to_string())
}

pub fn export(
    resolver: &PathResolver,
    scope: &Scope,
    target: Option<&str>,
    source: ReplySource<'_>,
    exporter: &dyn DocumentExporter,
) -> anyhow::Result<PathBuf> {
    let reply = match source {
        ReplySource::File(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        }
        ReplySource::Clipboard(clipboard) => clipboard.read_text_or_empty(),
    };
    let state = with_target(loaded_state(resolver, scope)?, target)?;
    let (state, _) = apply(state, Msg::ReplyEdited(reply))?;
    let (_, effects) = apply(state, Msg::ExportClicked)?;

    for effect in effects {
        if let Effect::Export {
            output_dir,
            source,
            content,
            ..
        } = effect
        {
            return exporter
                .export(&output_dir, &source, &content)
                .map_err(|err| anyhow!("{}", action_error_from_export(err)));
        }
    }
    bail!("nothing exported")
}

/// Clipboard-backed `export` with the real exporter.
pub fn export_with_system(
    resolver: &PathResolver,
    scope: &Scope,
    target: Option<&str>,
    file: Option<&Path>,
) -> anyhow::Result<PathBuf> {
    let exporter = DocxExporter::new();
    match file {
        Some(path) => export(resolver, scope, target, ReplySource::File(path), &exporter),
        None => {
            let clipboard = SystemClipboard::new();
            export(resolver, scope, target, ReplySource::Clipboard(&clipboard), &exporter)
        }
    }
}
