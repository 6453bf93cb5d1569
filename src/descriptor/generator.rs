//! Descriptor generation from the resolved configuration model.

use crate::constants::{
    DESCRIPTOR_CUTOFF, GAME_DEPENDENCY_ID, LOADER_DEPENDENCY_ID, MODS_TOML, NEOFORGE_MODS_TOML,
};
use crate::core::{ModmetaError, Result};
use crate::dependencies::{DependencyKind, ModDependency, Ordering, Side};
use crate::descriptor::{Dependency, DependencyMcPublish, McPublish, Mod, ModsToml};
use crate::settings::{ProjectSettings, ProjectType};
use std::collections::{BTreeMap, HashSet};

/// Build the descriptor tree from the configuration model.
///
/// Pure given a resolvable configuration: the same settings always produce
/// the same tree, and a setting that cannot be resolved fails here with an
/// error naming it. Exactly one mod entry is emitted, representing the
/// current project.
///
/// For MOD projects two dependency entries are synthesized before any
/// declared ones: on the loader platform and on the base game, both
/// required, unordered and side-neutral, with their version ranges taken
/// from the `neo_version_range` and `mc_version_range` settings. LIBRARY
/// projects get no synthesized entries, so a library without declared
/// dependencies omits the dependency map entirely.
pub fn generate(settings: &ProjectSettings) -> Result<ModsToml> {
    let project_id = settings.project_id.require()?;
    let project_type = settings.project_type.require()?;

    let mut dependencies = Vec::new();
    if project_type == ProjectType::Mod {
        dependencies.push(Dependency {
            mod_id: LOADER_DEPENDENCY_ID.to_string(),
            version_range: settings.neo_version_range.require()?,
            kind: DependencyKind::Required,
            ordering: Ordering::None,
            side: Side::Both,
            mc_publish: None,
        });
        dependencies.push(Dependency {
            mod_id: GAME_DEPENDENCY_ID.to_string(),
            version_range: settings.minecraft_version_range.require()?,
            kind: DependencyKind::Required,
            ordering: Ordering::None,
            side: Side::Both,
            mc_publish: None,
        });
    }
    for declared in settings.resolved_dependencies()? {
        dependencies.push(dependency_entry(declared));
    }

    let mut seen = HashSet::new();
    for dependency in &dependencies {
        if dependency.mod_id.is_empty() {
            return Err(ModmetaError::EmptyDependencyId);
        }
        if !seen.insert(dependency.mod_id.clone()) {
            return Err(ModmetaError::DuplicateDependency {
                mod_id: dependency.mod_id.clone(),
            });
        }
    }

    let mc_publish = McPublish {
        modrinth: settings.mc_publish.modrinth.get()?,
        curseforge: settings.mc_publish.curseforge.get()?,
    };

    let modproperties = settings.modproperties();

    Ok(ModsToml {
        mod_loader: settings.loader.name.require()?,
        loader_version: settings.loader.version.require()?,
        license: settings.license.name.require()?,
        issue_tracker_url: settings.github.issues_url.get()?,
        mods: vec![Mod {
            mod_id: project_id.clone(),
            version: settings.project_version.require()?,
            display_name: settings.project_name.require()?,
            display_url: settings.project_url.get()?,
            logo_file: settings.project_logo.get()?,
            credits: settings.project_credits.get()?,
            authors: settings.project_authors.get()?,
            description: settings.project_description.get()?,
        }],
        mc_publish: (!mc_publish.is_empty()).then_some(mc_publish),
        dependencies: (!dependencies.is_empty())
            .then(|| BTreeMap::from([(project_id.clone(), dependencies)])),
        modproperties: (!modproperties.is_empty())
            .then(|| BTreeMap::from([(project_id, modproperties)])),
    })
}

fn dependency_entry(declared: ModDependency) -> Dependency {
    let mc_publish = DependencyMcPublish {
        modrinth: declared.modrinth_id,
        curseforge: declared.curseforge_id,
    };
    Dependency {
        mod_id: declared.mod_id,
        // Resolution guarantees the range; an empty one is a container bug.
        version_range: declared.version_range.unwrap_or_default(),
        kind: declared.kind,
        ordering: declared.ordering,
        side: declared.side,
        mc_publish: (mc_publish.modrinth.is_some() || mc_publish.curseforge.is_some())
            .then_some(mc_publish),
    }
}

/// Select the descriptor file name for the targeted Minecraft version.
///
/// Versions newer than 1.20.5 use the renamed `neoforge.mods.toml`; older
/// ones keep `mods.toml`. Only the minor (and, when present, patch)
/// component takes part in the comparison; a version with an unexpected
/// number of components is treated as not newer.
pub fn descriptor_file_name(minecraft_version: &str) -> Result<&'static str> {
    let (cutoff_minor, cutoff_patch) = DESCRIPTOR_CUTOFF;
    let components: Vec<&str> = minecraft_version.split('.').collect();

    let parse = |component: &str| -> Result<u32> {
        component
            .parse()
            .map_err(|_| ModmetaError::InvalidMinecraftVersion {
                version: minecraft_version.to_string(),
            })
    };

    let newer = match components.as_slice() {
        [_, minor] => parse(minor)? > cutoff_minor,
        [_, minor, patch] => {
            let minor = parse(minor)?;
            minor > cutoff_minor || (minor == cutoff_minor && parse(patch)? > cutoff_patch)
        }
        _ => false,
    };

    Ok(if newer { NEOFORGE_MODS_TOML } else { MODS_TOML })
}
