//
//  storedesk
//  cli/stats.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Args;

use crate::api::resources::DashboardStats;
use crate::output::{format_amount, print_field, print_header, TableOutput};

use super::GlobalOptions;

/// Show dashboard statistics
#[derive(Args, Debug)]
pub struct StatsCommand {}

impl TableOutput for DashboardStats {
    fn print_table(&self, color: bool) {
        print_header("Today");
        print_field("Orders", &self.today_order_count.to_string(), 10, color);
        print_field("Sales", &format_amount(self.today_sales), 10, color);
        println!();
        print_header("All time");
        print_field("Orders", &self.order_count.to_string(), 10, color);
        print_field("Sales", &format_amount(self.total_sales), 10, color);
        print_field("Products", &self.product_count.to_string(), 10, color);
        print_field("Members", &self.user_count.to_string(), 10, color);
    }
}

impl StatsCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client("/dashboard")?;
        let stats = client.dashboard_stats().await;
        global.writer().write(&stats)
    }
}
