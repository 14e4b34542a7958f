//! 服务注册表的集成测试

use registry_impl::{
    instance, Arguments, DefinitionSource, Definitions, FnDefinitionSource, Instance,
    ObjectRegistry, ObjectRegistryExt, RegistryConfig, RegistryContext, RegistryError, Scope,
    ServiceRegistry,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 测试服务
#[derive(Debug)]
struct TestService {
    name: String,
}

/// 依赖 [`TestService`] 的服务
#[derive(Debug)]
struct Consumer {
    service: Arc<TestService>,
    label: Arc<String>,
}

/// 以固定定义实现的容器
struct ApplicationContainer;

impl DefinitionSource for ApplicationContainer {
    fn load_all_definitions(&self) -> Option<Definitions> {
        Some(Box::new(|registry| {
            registry.register_typed("TestService", Scope::Singleton, |_| {
                Ok(TestService {
                    name: "shared".to_string(),
                })
            })?;
            registry.register_typed("Consumer", Scope::Prototype, |registry| {
                Ok(Consumer {
                    service: registry.resolve::<TestService>("TestService")?,
                    label: registry.resolve::<String>("label")?,
                })
            })
        }))
    }

    fn name(&self) -> &str {
        "application"
    }
}

#[test]
fn test_prototype_and_singleton_scenario() -> anyhow::Result<()> {
    let registry = ServiceRegistry::new();
    registry.register("Foo", Scope::Prototype, |_| Ok(instance(Vec::<u8>::new())))?;
    registry.register("Bar", Scope::Singleton, |registry| {
        registry.new_object("Foo", None)
    })?;

    let foo1 = registry.new_object("Foo", None)?;
    let foo2 = registry.new_object("Foo", None)?;
    let bar1 = registry.new_object("Bar", None)?;
    let bar2 = registry.new_object("Bar", None)?;

    assert!(!Arc::ptr_eq(&foo1, &foo2));
    assert!(Arc::ptr_eq(&bar1, &bar2));
    assert!(!Arc::ptr_eq(&registry.new_object("Foo", None)?, &bar1));
    Ok(())
}

#[test]
fn test_container_wires_dependencies() -> anyhow::Result<()> {
    let registry = ServiceRegistry::with_container(&ApplicationContainer)?;

    let mut arguments = Arguments::new();
    arguments.insert("label".to_string(), instance(String::from("first")));
    let first = registry.resolve_with::<Consumer>("Consumer", arguments)?;

    let mut arguments = Arguments::new();
    arguments.insert("label".to_string(), instance(String::from("second")));
    let second = registry.resolve_with::<Consumer>("Consumer", arguments)?;

    assert!(!Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&first.service, &second.service));
    assert_eq!(first.service.name, "shared");
    assert_eq!(first.label.as_str(), "first");
    assert_eq!(second.label.as_str(), "second");

    // 参数绑定在调用结束后仍然保留
    assert_eq!(registry.resolve::<String>("label")?.as_str(), "second");
    assert_eq!(
        registry.get_all_services().keys().collect::<Vec<_>>(),
        vec!["TestService", "Consumer", "label"]
    );
    Ok(())
}

#[test]
fn test_missing_argument_is_not_found() -> anyhow::Result<()> {
    let registry = ServiceRegistry::with_container(&ApplicationContainer)?;

    let err = registry.resolve::<Consumer>("Consumer").unwrap_err();
    assert!(matches!(err, RegistryError::NotFound { ref name } if name == "label"));
    assert_eq!(registry.recursion_level(), 0);
    Ok(())
}

#[test]
fn test_mutual_recursion_is_circular_dependency() -> anyhow::Result<()> {
    let registry = ServiceRegistry::new();
    registry.register("Ping", Scope::Prototype, |registry| {
        registry.new_object("Pong", None)
    })?;
    registry.register("Pong", Scope::Prototype, |registry| {
        registry.new_object("Ping", None)
    })?;

    let err = registry.new_object("Ping", None).unwrap_err();
    assert!(err.is_circular_dependency());
    assert_eq!(registry.recursion_level(), 0);
    Ok(())
}

#[test]
fn test_singleton_self_reference_does_not_deadlock() -> anyhow::Result<()> {
    let registry = ServiceRegistry::new();
    registry.register("Loop", Scope::Singleton, |registry| {
        registry.new_object("Loop", None)
    })?;

    assert!(registry
        .new_object("Loop", None)
        .unwrap_err()
        .is_circular_dependency());
    Ok(())
}

#[test]
fn test_definitions_can_be_loaded_in_several_passes() -> anyhow::Result<()> {
    let registry = ServiceRegistry::new();
    let first = FnDefinitionSource::new("first", |registry| {
        registry.register_typed("A", Scope::Prototype, |_| Ok(1u32))
    });
    let second = FnDefinitionSource::new("second", |registry| {
        registry.register_typed("B", Scope::Prototype, |registry| {
            Ok(*registry.resolve::<u32>("A")? + 1)
        })
    });

    registry.register_container(&first)?;
    registry.register_container(&second)?;

    assert_eq!(*registry.resolve::<u32>("B")?, 2);
    assert_eq!(registry.len(), 2);
    Ok(())
}

#[test]
fn test_concurrent_singleton_resolution_yields_one_instance() -> anyhow::Result<()> {
    let registry = Arc::new(ServiceRegistry::new());
    let created = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&created);
    registry.register("Pool", Scope::Singleton, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(instance(String::from("pool")))
    })?;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || registry.new_object("Pool", None))
        })
        .collect();

    let instances = handles
        .into_iter()
        .map(|handle| handle.join().expect("resolver thread panicked"))
        .collect::<Result<Vec<Instance>, _>>()?;

    let first = &instances[0];
    assert!(instances.iter().all(|other| Arc::ptr_eq(first, other)));
    assert!(created.load(Ordering::SeqCst) >= 1);
    Ok(())
}

#[test]
fn test_concurrent_dependency_chains_with_default_config() -> anyhow::Result<()> {
    use std::sync::Barrier;
    use std::time::Duration;

    const THREADS: usize = 16;

    let registry = Arc::new(ServiceRegistry::new());
    registry.register_container(&ApplicationContainer)?;
    registry.register("label", Scope::Prototype, |_| {
        Ok(instance(String::from("concurrent")))
    })?;
    registry.register("Slow", Scope::Prototype, |registry| {
        std::thread::sleep(Duration::from_millis(50));
        registry.new_object("Consumer", None)
    })?;

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                barrier.wait();
                registry.new_object("Slow", None)
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("resolver thread panicked")?;
    }
    assert_eq!(registry.recursion_level(), 0);
    Ok(())
}

#[test]
fn test_registry_built_with_config_and_container() -> anyhow::Result<()> {
    let config = RegistryConfig::default().with_max_recursion_depth(1);
    let registry = ServiceRegistry::with_config_and_container(&config, &ApplicationContainer)?;

    assert_eq!(registry.max_recursion_depth(), 1);
    assert!(registry.has_object("TestService")?);
    // Consumer 需要两层嵌套解析，超过上限
    let err = registry.new_object("Consumer", None).unwrap_err();
    assert!(err.is_circular_dependency());
    Ok(())
}

#[test]
fn test_context_registries_are_isolated() -> anyhow::Result<()> {
    let context = RegistryContext::new();
    context
        .get("a")
        .register_container(&ApplicationContainer)?;

    assert!(context.get("a").has_object("TestService")?);
    assert!(!context.get("b").has_object("TestService")?);
    assert!(Arc::ptr_eq(&context.get("a"), &context.get("a")));
    Ok(())
}
