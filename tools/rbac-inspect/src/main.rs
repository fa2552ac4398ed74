//! RBAC 检查工具
//!
//! 用法：
//!   relief-rbac-inspect                       打印角色权限矩阵
//!   relief-rbac-inspect check ROLE PERMISSION 按配置的守卫检查单个角色是否拥有权限

use std::process::ExitCode;

use relief_auth_core::{Guard, Permission, Principal, Role, permissions_for};
use relief_config::AppConfig;
use tracing::{error, warn};

fn print_matrix() {
    let header: Vec<String> = Role::ALL.iter().map(|r| format!("{:>14}", r.as_str())).collect();
    println!("{:<22}{}", "", header.join(""));

    for permission in Permission::ALL.iter().copied() {
        let cells: Vec<String> = Role::ALL
            .iter()
            .map(|role| {
                let mark = if permissions_for(*role).contains(&permission) { "x" } else { "-" };
                format!("{:>14}", mark)
            })
            .collect();
        println!("{:<22}{}", permission.as_str(), cells.join(""));
    }
}

fn check(config: &AppConfig, role: &str, permission: &str) -> ExitCode {
    let permission: Permission = match permission.parse() {
        Ok(permission) => permission,
        Err(e) => {
            error!(error = %e, "Check failed");
            return ExitCode::FAILURE;
        }
    };

    let metrics = if config.authorization.record_metrics {
        relief_telemetry::init_metrics()
            .inspect_err(|e| warn!(error = %e, "Prometheus recorder not installed"))
            .ok()
    } else {
        None
    };

    let principal = Principal::new("rbac-inspect", role, "rbac-inspect");
    let guard = Guard::new(&config.authorization);
    match guard.require_permission(Some(&principal), permission) {
        Ok(()) => println!("ALLOW"),
        Err(e) => println!("DENY ({})", e),
    }

    if let Some(handle) = metrics {
        print!("{}", handle.render());
    }
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    let config = match AppConfig::load("config") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    relief_telemetry::init_from_config(&config.telemetry, config.is_production());

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => {
            print_matrix();
            ExitCode::SUCCESS
        }
        [cmd, role, permission] if cmd == "check" => check(&config, role, permission),
        _ => {
            eprintln!("usage: relief-rbac-inspect [check ROLE PERMISSION]");
            ExitCode::from(2)
        }
    }
}
