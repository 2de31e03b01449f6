use azvm_infra::ProvisioningRequest;
use clap::Parser;

const EXAMPLES: &str = "\
Examples:
  # Provisions default VM
  azvm -g MyResourceGroup -n MyVm

  # Specifies username and password
  azvm -g MyResourceGroup -n MyVM --username azureusername --password 'v8$748s~AV9M'

  # Provisions a B12ms SKU sized VM
  azvm -g MyResourceGroup -n MyVM --size Standard_B12ms

  # Specifies region and username
  azvm -g MyResourceGroup -n MyVM --region westus2 --username azureuser";

#[derive(Debug, Parser)]
#[command(name = "azvm")]
#[command(about = "Provision an Ubuntu VM and its network stack in Azure", long_about = None)]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// Name of the resource group
    #[arg(short = 'g', long = "resource-group", alias = "resourcegroup")]
    pub resource_group: String,

    /// Name of the VM
    #[arg(short, long)]
    pub name: String,

    /// Location to deploy the resources in
    #[arg(short, long, default_value = "eastus")]
    pub region: String,

    /// Size of the VM
    #[arg(short, long, default_value = "Standard_D4s_v3")]
    pub size: String,

    /// Admin username of the VM, used for SSH
    #[arg(short, long, default_value = "azureadmin")]
    pub username: String,

    /// Password for the admin user (prompted for when omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

impl Cli {
    pub fn into_request(self, admin_password: String) -> ProvisioningRequest {
        ProvisioningRequest {
            resource_group: self.resource_group,
            name: self.name,
            region: self.region,
            size: self.size,
            admin_username: self.username,
            admin_password,
        }
    }
}
