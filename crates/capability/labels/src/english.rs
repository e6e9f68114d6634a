//! 英文标签表。

/// 寄存器名称（MPL 代码）。
pub(crate) const MPL: &[(u32, &str)] = &[
    // 计数器
    (2700, "Running Hours"),
    (2701, "Loaded Hours"),
    (2702, "Motor Starts"),
    (2703, "Module Hours"),
    (2704, "Accumulated Volume"),
    (2705, "Load Relay"),
    (2706, "VSD 1-20% RPM"),
    (2707, "VSD 20-40% RPM"),
    (2708, "VSD 40-60% RPM"),
    (2709, "VSD 60-80% RPM"),
    (2710, "VSD 80-100% RPM"),
    (2777, "Fan Starts"),
    // 模拟量输入
    (509, "Compressor Outlet"),
    (602, "Dp Oil Separator"),
    (1000, "Ambient Air"),
    (1008, "Element Outlet"),
    // 数字量输入
    (2100, "Emergency Stop"),
    (2105, "Overload Fan Motor"),
    (2110, "Electronic Condensate Drain"),
    (2124, "Pressure Setting Selection"),
    // 数字量输出
    (2305, "General Warning"),
    (2306, "General Shutdown"),
    (2307, "Automatic Operation"),
    (2309, "Fan Motor"),
    (2310, "Run Enable Main Motor"),
    (2313, "Blowoff"),
    // 特殊保护
    (2975, "No Valid Pressure Control"),
    (2991, "Expansion Module Communication"),
    (7385, "Motor Converter 1 Alarm"),
];

/// 机器状态。
pub(crate) const MACHINE_STATE: &[(u32, &str)] = &[
    (1, "Power Up"),
    (2, "Power Up ES"),
    (3, "Off"),
    (4, "Local Operation ES"),
    (5, "Standby"),
    (6, "Stopped"),
    (7, "Central Stopped ES"),
    (8, "Off & Minimum Stop Time"),
    (9, "Standby & Minimum Stop Time"),
    (10, "Stopped & Minimum Stop Time"),
    (11, "Start Check"),
    (12, "Start Failure"),
    (13, "Shutdown"),
    (14, "Shutdown ES"),
    (15, "Shutting down"),
    (16, "Starting"),
    (17, "Starting Unload"),
    (18, "Unload"),
    (19, "Manual Unload & Starting"),
    (20, "Manual Unload"),
    (21, "Manual Unload & Unload Time"),
    (22, "Minimum Speed & Manual Stop"),
    (23, "Minimum Speed & Automatic Stop"),
    (24, "Automatic Stop & Converter Check"),
    (25, "Manual Stop & Converter Check"),
    (26, "Automatic Stop in progress"),
    (27, "Overpressure"),
    (28, "Load"),
    (29, "Minimum Speed & Manual Stop"),
    (30, "Automatic Operation ES"),
    (31, "Minimum Speed & Automatic Stop"),
    (32, "Forced Unload"),
    (33, "Dryer Off"),
    (34, "Shifting Vessels, Activate B"),
    (35, "Shifting Vessels, Isolate A"),
    (36, "A: Pressure Relief"),
    (37, "A: Open Regeneration Valve"),
    (38, "A: Starting Blower"),
    (39, "A: Heating With Blower"),
    (40, "A: Extra Heating With Blower"),
    (41, "A: Pre-Cooling With Blower"),
    (42, "A: Stopping Blower"),
    (43, "A: Heating With Dry Air"),
    (44, "A: Cooling With Dry Air"),
    (45, "A: Prepare Blower Cooling"),
    (46, "A: Cooling With Blower"),
    (47, "A: Stopping Cooling"),
    (48, "A: Pressure Equalization"),
    (49, "A: Split Flow Cooling"),
    (50, "A: Standby"),
    (51, "Shifting Vessels, Activate A"),
    (52, "Shifting Vessels, Isolate B"),
    (53, "B: Pressure Relief"),
    (54, "B: Open Regeneration Valve"),
    (55, "B: Starting Blower"),
    (56, "B: Heating With Blower"),
    (57, "B: Extra Heating With Blower"),
    (58, "B: Pre-Cooling With Blower"),
    (59, "B: Stopping Blower"),
    (60, "B: Heating With Dry Air"),
    (61, "B: Cooling With Dry Air"),
    (62, "B: Prepare Blower Cooling"),
    (63, "B: Cooling With Blower"),
    (64, "B: Stopping Cooling"),
    (65, "B: Pressure Equalization"),
    (66, "B: Split Flow Cooling"),
    (67, "B: Standby"),
    (68, "Dryer PowerUp"),
    (69, "Dryer Shutdown"),
    (70, "Pressure Relief Vessel A"),
    (71, "Open Regeneration Valve A"),
    (72, "Pressure Relief Vessel B"),
    (73, "Open Regeneration Valve B"),
    (74, "Pressure Equalization"),
    (75, "A: Regeneration"),
    (76, "A: Cooling"),
    (77, "B: Regeneration"),
    (78, "B: Cooling"),
    (79, "Initial Start"),
    (80, "Dryer Standby"),
    (81, "Dryer Start Check"),
    (82, "Dryer Start Failure"),
    (83, "Dryer Shutting Down"),
    (84, "Dryer Starting"),
    (85, "Dryer Running"),
    (86, "Output Test"),
    (87, "Safety Valve Test"),
    (88, "Regreasing"),
    (89, "Tuning Dryer"),
    (90, "Starting Load"),
    (91, "Start Delayed"),
    (92, "Low Speed & Manual Stop"),
    (93, "Low Speed & Automatic Stop"),
    (94, "Pre-Cooling"),
    (95, "ZR Start Request"),
    (96, "ZR Pre-Running"),
    (97, "ZD Load Delay Time"),
    (98, "ZD Stop Delay Time"),
    (99, "ZD Unload Delay Time"),
    (100, "Blow Off"),
    (101, "A: Stopping Dryer - Cooling Heater"),
    (102, "B: Stopping Dryer - Cooling Heater"),
    (103, "Go To Minimum Speed"),
    (104, "Manual Start Delay"),
    (105, "Running"),
    (106, "Loaded Capacity Regulation"),
    (107, "Loaded Flow Regulation"),
    (108, "Loaded Pressure Regulation"),
    (109, "Loading"),
    (110, "Manual Unloading"),
    (111, "Not Ready To Start"),
    (112, "Resetting"),
    (113, "Service Control Running"),
    (114, "Service Control Stopped"),
    (115, "Start Pending"),
    (116, "Stop Pending"),
    (117, "Stopping"),
    (118, "Unloading"),
    (119, "A: Shifting Vessels: Open V4"),
    (120, "A: Shifting Vessels: Close V3 + V8 + V14"),
    (121, "A: Prepare Regeneration: Open V1 + V30"),
    (122, "A: Prepare Regeneration: Open V9 + V13"),
    (123, "A: Full Flow Regeneration"),
    (124, "A: Controlled Flow Reg With Heaters"),
    (125, "A: Controlled Flow Cooling Down Heaters"),
    (126, "A: Prepare Cooling: Open V5"),
    (127, "A: Prepare Cooling: Open V16 + V23"),
    (128, "A: Prepare Cooling: Close V17 + V30"),
    (129, "A: Full Flow Cooling"),
    (130, "A: Prepare SFC: Open V3 + V17"),
    (131, "A: Prepare Standby: Open V13"),
    (132, "A: Prepare Cooling: Close V1"),
    (133, "A: Pressure Relief: Open V6"),
    (134, "A: Dry Air Cooling"),
    (135, "A: Prepare Regeneration: Open V13 + V22"),
    (136, "B: Shifting Vessels: Open V3"),
    (137, "B: Shifting Vessels: Close V4 + V9 + V13"),
    (138, "B: Prepare Regeneration: Open V2 + V30"),
    (139, "B: Prepare Regeneration: Open V8 + V14"),
    (140, "B: Full Flow Regeneration"),
    (141, "B: Controlled Flow Reg With Heaters"),
    (142, "B: Controlled Flow Cooling Down Heaters"),
    (143, "B: Prepare Cooling: Open V5"),
    (144, "B: Prepare Cooling: Open V17 + V23"),
    (145, "B: Prepare Cooling: Close V16 + V30"),
    (146, "B: Full Flow Cooling"),
    (147, "B: Prepare SFC: Open V4 + V16"),
    (148, "B: Prepare Standby: Open V14"),
    (149, "B: Prepare Cooling: Close V2"),
    (150, "B: Pressure Relief: Open V7"),
    (151, "B: Dry Air Cooling"),
    (152, "B: Prepare Regeneration: Open V14 + V22"),
    (153, "A: Pres.Equalization  B:Pres.Equalization"),
    (154, "A: Production  B: Regenerating"),
    (155, "A: Regenerating  B: Production"),
    (156, "A: No Production  B: Regenerating"),
    (157, "A: Regenerating  B: No Production"),
    (158, "Stopping: Equalize Vessels"),
    (159, "Stopping: Depressurize Vessels"),
    (160, "Off Wait"),
    (161, "Standby Wait"),
    (162, "Stopped Wait"),
    (163, "Stopped Standby Wait"),
    (164, "Manual Stop Command Stopping"),
    (165, "Auto Stopping"),
    (166, "Auto Stop Command Stopping"),
    (167, "Unload After Command Stopping"),
    (168, "Manual Stop Cmd Check Stop Converter"),
    (169, "Auto Stopping"),
    (170, "Auto Stop Cmd Check Stop Converter"),
    (171, "Stopped Standby Check Stop Converter"),
    (172, "Loading"),
    (173, "Man. Stop Cmd Go To Minimum RPM"),
    (174, "Do Unload Go To Minimum RPM"),
    (175, "Remote Stop Cmd Go To Minimum RPM"),
    (176, "Man. Unload Cmd Go To Minimum RPM"),
    (177, "Manual Stop Command Unloading"),
    (178, "Do Unload Unloading"),
    (179, "Auto Stop Command Unloading"),
    (180, "Manual Unload Command Unloading"),
    (181, "Low Suction"),
    (182, "High Suction"),
    (183, "A: Regeneration With Heaters"),
    (184, "B: Regeneration With Heaters"),
    (185, "Purge Saving"),
    (186, "A: Prepare SFC: Open V3 + V17 + V30"),
    (187, "B: Prepare SFC: Open V4 + V16 + V30"),
    (188, "A: Prepare Standby: Open V13 + V30"),
    (189, "B: Prepare Standby: Open V14 + V30"),
    (190, "Load 50%"),
    (191, "A: Shifting Vessels Phase 1"),
    (192, "A: Shifting Vessels Phase 2"),
    (193, "A: Prepare Regeneration Phase 1"),
    (194, "A: Prepare Regeneration Phase 2"),
    (195, "A: Prepare Cooling Phase 1"),
    (196, "A: Prepare Cooling Phase 2"),
    (197, "A: Prepare Cooling Phase 3"),
    (198, "A: Prepare Split Flow Cooling"),
    (199, "A: Prepare Standby"),
    (200, "B: Shifting Vessels Phase 1"),
    (201, "B: Shifting Vessels Phase 2"),
    (202, "B: Prepare Regeneration Phase 1"),
    (203, "B: Prepare Regeneration Phase 2"),
    (204, "B: Prepare Cooling Phase 1"),
    (205, "B: Prepare Cooling Phase 2"),
    (206, "B: Prepare Cooling Phase 3"),
    (207, "B: Prepare Split Flow Cooling"),
    (208, "B: Prepare Standby"),
    (209, "Recirculation"),
    (210, "Purge"),
    (211, "Preparing to go online"),
    (212, "Man. stop cmd go to min. RPM"),
    (213, "Remote stop cmd go to min. RPM"),
    (214, "Manual stop cmd run min. RPM"),
    (215, "Remote stop cmd run min. RPM"),
    (216, "Automatic stop run minimum RPM"),
    (217, "Manual stop cmd check stop converter"),
    (218, "Auto stop cmd check stop converter"),
    (219, "Automatic Stop check stop converter"),
    (220, "Vacuum control"),
    (221, "Pre-run"),
    (222, "Automatic stop go to min. RPM"),
    (223, "Remote start cmd check stop converter"),
];

/// 变频器型号。
pub(crate) const CONVERTER_TYPE: &[(u32, &str)] = &[
    (1, "ABB ACS600"),
    (2, "SIEMENS MASTERDRIVE"),
    (3, "VACON CX"),
    (4, "VACON NX"),
    (5, "ABB ACS140/350"),
    (6, "ABB ACS400"),
    (7, "SIEMENS µ-MASTER"),
    (8, "WEG CFW09"),
    (9, "ABB ACS310/550"),
    (10, "VACON NXL"),
    (11, "SCHNEIDER ALTIVAR"),
    (12, "KEB"),
    (13, "SIEMENS SINAMICS 130"),
    (14, "WEG CFW11"),
    (15, "SIEMENS SINAMICS 120"),
    (16, "CT COMMANDER SK"),
    (17, "DANFOSS CDS"),
    (18, "YASKAWA SYNC"),
    (19, "ELSTO"),
    (20, "ABB ACS850"),
    (21, "INOVANCE"),
    (22, "WEG CFW700"),
    (23, "ABB ACS880"),
    (24, "YASKAWA ASYNC"),
    (50, "BEARING CONTROLLER"),
    (100, "NEOS"),
    (200, "MBC S2M"),
];

pub(crate) const DIGITAL_STATE: &[(u32, &str)] = &[(0, "Open"), (1, "Closed")];

pub(crate) const PRESSURE_SETTING: &[(u32, &str)] = &[(0, "Setpoint 1"), (1, "Setpoint 2")];

pub(crate) const SENSOR_ERROR: &[(u32, &str)] = &[(1, "Sensor Error")];

/// 1 为复数形式，2 为单数形式。
pub(crate) const HOUR_UNIT: &[(u32, &str)] = &[(1, "hrs"), (2, "hr")];

pub(crate) const SECTION_TITLE: &[(u32, &str)] = &[
    (1, "Analog Inputs"),
    (3, "Counters"),
    (4, "Converters"),
    (5, "Info"),
    (6, "Digital Inputs"),
    (7, "Digital Outputs"),
    (8, "Special Protections"),
];
