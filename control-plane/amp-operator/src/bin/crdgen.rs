use amp_operator::crd::api_manager::ApiManager;
use kube::core::CustomResourceExt;

fn main() {
    let crd = ApiManager::crd();
    let yaml = serde_yaml::to_string(&crd).expect("serialize CRD to YAML");
    println!("{}", yaml);
}
