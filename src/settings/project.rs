//! The project settings model and its derivation rules.

use crate::constants::{
    DEFAULT_LICENSE_FILE, DEFAULT_LOADER_NAME, DEFAULT_RELEASE_TYPE, ENV_CI, ENV_MAVEN_PASSWORD,
    ENV_MAVEN_URL, ENV_MAVEN_USER, ENV_RELEASE_TYPE,
};
use crate::core::{ModmetaError, Result};
use crate::dependencies::{DependencyContainer, ModDependency};
use crate::properties::{Environment, PropertyStore};
use crate::settings::graph::{Setting, SettingRegistry};
use crate::settings::keys::{JavaVendor, LogicalField, ProjectType, property_key};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// GitHub coordinates and the URL family derived from them.
///
/// Everything hangs off `owner`/`repository`: when either is absent the
/// whole family is absent, which in turn drops the optional issue-tracker
/// URL from the descriptor.
pub struct GitHubSettings {
    /// Repository owner, from `github_owner`.
    pub owner: Setting<String>,
    /// Repository name, from `github_repo`.
    pub repository: Setting<String>,
    /// `owner/repository`.
    pub reference: Setting<String>,
    /// `https://github.com/{ref}`.
    pub url: Setting<String>,
    /// `{url}/issues`.
    pub issues_url: Setting<String>,
    /// `{url}/actions`.
    pub actions_url: Setting<String>,
    /// Read-only SCM connection locator.
    pub connection: Setting<String>,
    /// Writable SCM connection locator.
    pub developer_connection: Setting<String>,
}

impl GitHubSettings {
    fn new(registry: &mut SettingRegistry, store: &Rc<PropertyStore>) -> Self {
        let owner = property_setting(registry, store, "github_owner", "github_owner");
        let repository = property_setting(registry, store, "github_repository", "github_repo");
        let reference = {
            let owner = owner.clone();
            let repository = repository.clone();
            registry.derived(
                "github_ref",
                &["github_owner", "github_repository"],
                move || {
                    let (Some(owner), Some(repository)) = (owner.get()?, repository.get()?) else {
                        return Ok(None);
                    };
                    Ok(Some(format!("{owner}/{repository}")))
                },
            )
        };
        let url = mapped(registry, "github_url", &reference, "github_ref", |reference| {
            format!("https://github.com/{reference}")
        });
        let issues_url = mapped(registry, "github_issues_url", &url, "github_url", |url| {
            format!("{url}/issues")
        });
        let actions_url = mapped(registry, "github_actions_url", &url, "github_url", |url| {
            format!("{url}/actions")
        });
        let connection = mapped(
            registry,
            "github_connection",
            &reference,
            "github_ref",
            |reference| format!("scm:git:git://github.com/{reference}.git"),
        );
        let developer_connection = mapped(
            registry,
            "github_developer_connection",
            &reference,
            "github_ref",
            |reference| format!("scm:git:git@github.com:{reference}.git"),
        );
        Self {
            owner,
            repository,
            reference,
            url,
            issues_url,
            actions_url,
            connection,
            developer_connection,
        }
    }
}

/// License metadata packaged into the jar and the descriptor.
pub struct LicenseSettings {
    /// File copied into the jar, default `LICENSE`.
    pub file: Setting<String>,
    /// License name embedded in descriptor and manifest.
    pub name: Setting<String>,
    /// License URL for the published POM.
    pub url: Setting<String>,
}

impl LicenseSettings {
    fn new(registry: &mut SettingRegistry, store: &Rc<PropertyStore>) -> Self {
        let file = {
            let store = Rc::clone(store);
            registry.derived("license_file", &[], move || {
                Ok(Some(
                    store
                        .resolve("license_file")
                        .unwrap_or(DEFAULT_LICENSE_FILE)
                        .to_string(),
                ))
            })
        };
        Self {
            file,
            name: property_setting(registry, store, "license_name", "license_name"),
            url: property_setting(registry, store, "license_url", "license_url"),
        }
    }
}

/// Java toolchain selection.
pub struct JavaSettings {
    /// Java language version, from `java_version`.
    pub version: Setting<u32>,
    /// Toolchain vendor: Adoptium on CI, JetBrains locally.
    pub vendor: Setting<JavaVendor>,
}

impl JavaSettings {
    fn new(
        registry: &mut SettingRegistry,
        store: &Rc<PropertyStore>,
        running_in_ci: &Setting<bool>,
    ) -> Self {
        let version = {
            let store = Rc::clone(store);
            registry.derived("java_version", &[], move || {
                store
                    .resolve("java_version")
                    .map(|value| {
                        value.parse::<u32>().map_err(|_| {
                            ModmetaError::InvalidPropertyValue {
                                key: "java_version".to_string(),
                                value: value.to_string(),
                                reason: "expected an integer language version".to_string(),
                            }
                        })
                    })
                    .transpose()
            })
        };
        let vendor = {
            let running_in_ci = running_in_ci.clone();
            registry.derived("java_vendor", &["running_in_ci"], move || {
                Ok(Some(if running_in_ci.require()? {
                    JavaVendor::Adoptium
                } else {
                    JavaVendor::Jetbrains
                }))
            })
        };
        Self { version, vendor }
    }
}

/// Maven publishing target, read from the environment.
///
/// The target counts as configured only when URL, user and password are all
/// present; otherwise publishing falls back to a local repository folder.
pub struct MavenSettings {
    /// Repository URL from `MAVEN_URL`.
    pub url: Setting<String>,
    /// Username from `MAVEN_USER`.
    pub user: Setting<String>,
    /// Password from `MAVEN_PASSWORD`.
    pub password: Setting<String>,
    /// Whether all three credentials are present.
    pub valid: Setting<bool>,
}

impl MavenSettings {
    fn new(registry: &mut SettingRegistry, env: &Rc<Environment>) -> Self {
        let url = env_setting(registry, env, "maven_url", ENV_MAVEN_URL);
        let user = env_setting(registry, env, "maven_user", ENV_MAVEN_USER);
        let password = env_setting(registry, env, "maven_password", ENV_MAVEN_PASSWORD);
        let valid = {
            let url = url.clone();
            let user = user.clone();
            let password = password.clone();
            registry.derived(
                "maven_valid",
                &["maven_url", "maven_user", "maven_password"],
                move || {
                    Ok(Some(
                        url.get()?.is_some() && user.get()?.is_some() && password.get()?.is_some(),
                    ))
                },
            )
        };
        Self {
            url,
            user,
            password,
            valid,
        }
    }
}

/// Mod loader coordinates embedded into the descriptor.
pub struct LoaderSettings {
    /// Loader language provider, default `javafml`.
    pub name: Setting<String>,
    /// Loader version range, from `loader_version`.
    pub version: Setting<String>,
}

impl LoaderSettings {
    fn new(registry: &mut SettingRegistry, store: &Rc<PropertyStore>) -> Self {
        let name = {
            let store = Rc::clone(store);
            registry.derived("loader_name", &[], move || {
                Ok(Some(
                    store
                        .resolve("loader_name")
                        .unwrap_or(DEFAULT_LOADER_NAME)
                        .to_string(),
                ))
            })
        };
        Self {
            name,
            version: property_setting(registry, store, "loader_version", "loader_version"),
        }
    }
}

/// Cross-references linking the project to its distribution listings.
pub struct McPublishSettings {
    /// Modrinth project id, from `mc_publish_modrinth`.
    pub modrinth: Setting<String>,
    /// CurseForge project id, from `mc_publish_curseforge`.
    pub curseforge: Setting<i64>,
}

impl McPublishSettings {
    fn new(registry: &mut SettingRegistry, store: &Rc<PropertyStore>) -> Self {
        let curseforge = {
            let store = Rc::clone(store);
            registry.derived("mc_publish_curseforge", &[], move || {
                store
                    .resolve("mc_publish_curseforge")
                    .map(|value| {
                        value.parse::<i64>().map_err(|_| {
                            ModmetaError::InvalidPropertyValue {
                                key: "mc_publish_curseforge".to_string(),
                                value: value.to_string(),
                                reason: "expected a numeric project id".to_string(),
                            }
                        })
                    })
                    .transpose()
            })
        };
        Self {
            modrinth: property_setting(registry, store, "mc_publish_modrinth", "mc_publish_modrinth"),
            curseforge,
        }
    }
}

/// The fully wired configuration model of one build pass.
///
/// Built once from a property store and an environment snapshot; settings
/// resolve lazily and freeze on first read. Register overrides (and any
/// programmatic dependency declarations) before resolving anything -
/// resolving early freezes a default for the rest of the pass.
pub struct ProjectSettings {
    store: Rc<PropertyStore>,
    /// Whether the pass runs on CI, from the `CI` environment variable.
    pub running_in_ci: Setting<bool>,
    /// MOD or LIBRARY, from `project_type`, default MOD.
    pub project_type: Setting<ProjectType>,
    /// Normalized release type from `RELEASE_TYPE`, default `SNAPSHOT`.
    pub release_type: Setting<String>,
    /// Maven group, key per project type.
    pub project_group: Setting<String>,
    /// Mod id respectively library name, key per project type.
    pub project_id: Setting<String>,
    /// Project version, key per project type.
    pub project_version: Setting<String>,
    /// Display name; falls back to the project id for libraries.
    pub project_name: Setting<String>,
    /// Credits line shown by the loader, from `mod_credits`.
    pub project_credits: Setting<String>,
    /// Authors line shown by the loader, from `mod_authors`.
    pub project_authors: Setting<String>,
    /// Multi-line description, from `mod_description`.
    pub project_description: Setting<String>,
    /// Vendor for the jar manifest, key per project type.
    pub project_vendor: Setting<String>,
    /// Homepage; falls back to the GitHub URL.
    pub project_url: Setting<String>,
    /// Logo file packaged with the mod, from `mod_logo`.
    pub project_logo: Setting<String>,
    /// Targeted Minecraft version, from `mc_version`.
    pub minecraft_version: Setting<String>,
    /// Supported Minecraft version range, from `mc_version_range`.
    pub minecraft_version_range: Setting<String>,
    /// NeoForge version built against, from `neo_version`.
    pub neo_version: Setting<String>,
    /// Supported NeoForge version range, from `neo_version_range`.
    pub neo_version_range: Setting<String>,
    /// `{mc}-{version}` plus `-{release_type}` unless releasing.
    pub full_version: Setting<String>,
    /// `{group}:{id}:{full_version}`.
    pub artifact_locator: Setting<String>,
    /// GitHub coordinates and URL family.
    pub github: GitHubSettings,
    /// License metadata.
    pub license: LicenseSettings,
    /// Java toolchain selection.
    pub java: JavaSettings,
    /// Maven publishing target.
    pub maven: MavenSettings,
    /// Loader coordinates.
    pub loader: LoaderSettings,
    /// Distribution platform cross-references.
    pub mc_publish: McPublishSettings,
    /// Declared mod dependencies, in declaration order.
    pub dependencies: DependencyContainer,
    modproperties: RefCell<BTreeMap<String, String>>,
}

impl ProjectSettings {
    /// Wire the full derivation graph.
    ///
    /// Dependencies and mod properties declared in the store are picked up
    /// here; enum-valued dependency overrides are validated immediately.
    /// Finishes with the acyclicity check over the declared derivation
    /// edges.
    pub fn new(store: PropertyStore, env: Environment) -> Result<Self> {
        let store = Rc::new(store);
        let env = Rc::new(env);
        let mut registry = SettingRegistry::new();

        let running_in_ci = {
            let env = Rc::clone(&env);
            registry.derived("running_in_ci", &[], move || Ok(Some(env.flag(ENV_CI))))
        };

        let project_type = {
            let store = Rc::clone(&store);
            registry.derived("project_type", &[], move || {
                match store.resolve("project_type") {
                    Some(value) => value.parse::<ProjectType>().map(Some),
                    None => Ok(Some(ProjectType::Mod)),
                }
            })
        };

        let release_type = {
            let env = Rc::clone(&env);
            registry.derived("release_type", &[], move || {
                Ok(Some(match env.var(ENV_RELEASE_TYPE) {
                    Some(value) if value.eq_ignore_ascii_case("snapshot") => {
                        DEFAULT_RELEASE_TYPE.to_string()
                    }
                    Some(value) => value.to_lowercase(),
                    None => DEFAULT_RELEASE_TYPE.to_string(),
                }))
            })
        };

        let project_group =
            typed_property_setting(&mut registry, &store, &project_type, "project_group", LogicalField::Group);
        let project_id =
            typed_property_setting(&mut registry, &store, &project_type, "project_id", LogicalField::Id);
        let project_version =
            typed_property_setting(&mut registry, &store, &project_type, "project_version", LogicalField::Version);
        let project_vendor =
            typed_property_setting(&mut registry, &store, &project_type, "project_vendor", LogicalField::Vendor);

        let project_name = {
            let store = Rc::clone(&store);
            let project_type = project_type.clone();
            let project_id = project_id.clone();
            registry.derived(
                "project_name",
                &["project_type", "project_id"],
                move || match project_type.require()? {
                    ProjectType::Mod => Ok(store.resolve("mod_name").map(str::to_string)),
                    ProjectType::Library => project_id.get(),
                },
            )
        };

        let project_credits = property_setting(&mut registry, &store, "project_credits", "mod_credits");
        let project_authors = property_setting(&mut registry, &store, "project_authors", "mod_authors");
        let project_description =
            property_setting(&mut registry, &store, "project_description", "mod_description");
        let project_logo = property_setting(&mut registry, &store, "project_logo", "mod_logo");

        let minecraft_version =
            property_setting(&mut registry, &store, "minecraft_version", "mc_version");
        let minecraft_version_range =
            property_setting(&mut registry, &store, "minecraft_version_range", "mc_version_range");
        let neo_version = property_setting(&mut registry, &store, "neo_version", "neo_version");
        let neo_version_range =
            property_setting(&mut registry, &store, "neo_version_range", "neo_version_range");

        let full_version = {
            let minecraft_version = minecraft_version.clone();
            let project_version = project_version.clone();
            let release_type = release_type.clone();
            registry.derived(
                "full_version",
                &["minecraft_version", "project_version", "release_type"],
                move || {
                    let (Some(minecraft), Some(version)) =
                        (minecraft_version.get()?, project_version.get()?)
                    else {
                        return Ok(None);
                    };
                    let release = release_type.require()?;
                    Ok(Some(if release == "release" {
                        format!("{minecraft}-{version}")
                    } else {
                        format!("{minecraft}-{version}-{release}")
                    }))
                },
            )
        };

        let artifact_locator = {
            let project_group = project_group.clone();
            let project_id = project_id.clone();
            let full_version = full_version.clone();
            registry.derived(
                "artifact_locator",
                &["project_group", "project_id", "full_version"],
                move || {
                    let (Some(group), Some(id), Some(version)) =
                        (project_group.get()?, project_id.get()?, full_version.get()?)
                    else {
                        return Ok(None);
                    };
                    Ok(Some(format!("{group}:{id}:{version}")))
                },
            )
        };

        let github = GitHubSettings::new(&mut registry, &store);

        let project_url = {
            let store = Rc::clone(&store);
            let project_type = project_type.clone();
            let github_url = github.url.clone();
            registry.derived(
                "project_url",
                &["project_type", "github_url"],
                move || {
                    let key = property_key(project_type.require()?, LogicalField::Url);
                    match store.resolve(key) {
                        Some(value) => Ok(Some(value.to_string())),
                        None => github_url.get(),
                    }
                },
            )
        };

        let license = LicenseSettings::new(&mut registry, &store);
        let java = JavaSettings::new(&mut registry, &store, &running_in_ci);
        let maven = MavenSettings::new(&mut registry, &env);
        let loader = LoaderSettings::new(&mut registry, &store);
        let mc_publish = McPublishSettings::new(&mut registry, &store);

        registry.ensure_acyclic()?;

        let dependencies = DependencyContainer::new();
        dependencies.declare_from(&store)?;

        let modproperties = store
            .with_prefix("modproperty_")
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        Ok(Self {
            store,
            running_in_ci,
            project_type,
            release_type,
            project_group,
            project_id,
            project_version,
            project_name,
            project_credits,
            project_authors,
            project_description,
            project_vendor,
            project_url,
            project_logo,
            minecraft_version,
            minecraft_version_range,
            neo_version,
            neo_version_range,
            full_version,
            artifact_locator,
            github,
            license,
            java,
            maven,
            loader,
            mc_publish,
            dependencies,
            modproperties: RefCell::new(modproperties),
        })
    }

    /// The backing property store.
    #[must_use]
    pub fn store(&self) -> &PropertyStore {
        &self.store
    }

    /// Resolve the declared dependencies against the backing store.
    pub fn resolved_dependencies(&self) -> Result<Vec<ModDependency>> {
        self.dependencies.resolve(&self.store)
    }

    /// Add a free-form property published under the project's id.
    pub fn add_modproperty(&self, key: impl Into<String>, value: impl Into<String>) {
        self.modproperties.borrow_mut().insert(key.into(), value.into());
    }

    /// Snapshot of the free-form mod properties, sorted by key.
    #[must_use]
    pub fn modproperties(&self) -> BTreeMap<String, String> {
        self.modproperties.borrow().clone()
    }
}

/// A setting backed directly by one property key.
fn property_setting(
    registry: &mut SettingRegistry,
    store: &Rc<PropertyStore>,
    name: &str,
    key: &'static str,
) -> Setting<String> {
    let store = Rc::clone(store);
    registry.derived(name, &[], move || {
        Ok(store.resolve(key).map(str::to_string))
    })
}

/// A setting backed by one environment variable.
fn env_setting(
    registry: &mut SettingRegistry,
    env: &Rc<Environment>,
    name: &str,
    variable: &'static str,
) -> Setting<String> {
    let env = Rc::clone(env);
    registry.derived(name, &[], move || {
        Ok(env.var(variable).map(str::to_string))
    })
}

/// A setting whose property key switches with the project type.
fn typed_property_setting(
    registry: &mut SettingRegistry,
    store: &Rc<PropertyStore>,
    project_type: &Setting<ProjectType>,
    name: &str,
    field: LogicalField,
) -> Setting<String> {
    let store = Rc::clone(store);
    let project_type = project_type.clone();
    registry.derived(name, &["project_type"], move || {
        let key = property_key(project_type.require()?, field);
        Ok(store.resolve(key).map(str::to_string))
    })
}

/// A present-or-absent mapping over one upstream setting.
fn mapped(
    registry: &mut SettingRegistry,
    name: &str,
    upstream: &Setting<String>,
    upstream_name: &str,
    map: impl Fn(&str) -> String + 'static,
) -> Setting<String> {
    let upstream = upstream.clone();
    registry.derived(name, &[upstream_name], move || {
        Ok(upstream.get()?.map(|value| map(&value)))
    })
}
